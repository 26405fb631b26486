// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Regional principal catalog.
//!
//! Each operating region has one foreign security group that receives the
//! Owner grants. The catalog is fixed at build time and never mutated;
//! changing a group means shipping a new release, deliberately.

use uuid::Uuid;

/// An operating region with a delegated-administration security group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Region {
    Au,
    Nz,
    Hk,
    Sg,
}

/// The security group granted Owner in a region
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct Principal {
    /// Directory object id of the foreign security group
    pub object_id: Uuid,
    /// Human-facing description of the group
    pub description: &'static str,
}

impl Region {
    /// Every region, in presentation order
    pub const ALL: [Region; 4] = [Region::Au, Region::Nz, Region::Hk, Region::Sg];

    /// The two-letter region code
    pub fn code(&self) -> &'static str {
        match self {
            Region::Au => "AU",
            Region::Nz => "NZ",
            Region::Hk => "HK",
            Region::Sg => "SG",
        }
    }

    /// The security group receiving Owner grants in this region
    pub fn principal(&self) -> Principal {
        match self {
            Region::Au => Principal {
                object_id: uuid::uuid!("b1d52de1-30aa-48de-9220-c93f9b6c5711"),
                description: "Insight AU",
            },
            Region::Nz => Principal {
                object_id: uuid::uuid!("6d1214cc-2b9d-4e95-b3b5-62b2f3e5d31a"),
                description: "Insight NZ",
            },
            Region::Hk => Principal {
                object_id: uuid::uuid!("f0b3a2e7-41c8-4a59-9e11-8a4f27c90d44"),
                description: "Insight HK",
            },
            Region::Sg => Principal {
                object_id: uuid::uuid!("3c2f9b08-5d17-4f6e-a2d3-0e75c1649b8d"),
                description: "Insight SG",
            },
        }
    }
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl std::str::FromStr for Region {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "AU" => Ok(Region::Au),
            "NZ" => Ok(Region::Nz),
            "HK" => Ok(Region::Hk),
            "SG" => Ok(Region::Sg),
            _ => Err(format!(
                "unknown region '{}' (expected one of AU, NZ, HK, SG)",
                s
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn au_principal_is_fixed() {
        let principal = Region::Au.principal();
        assert_eq!(
            principal.object_id,
            uuid::uuid!("b1d52de1-30aa-48de-9220-c93f9b6c5711")
        );
        assert_eq!(principal.description, "Insight AU");
    }

    #[test]
    fn region_codes_round_trip() {
        for region in Region::ALL {
            assert_eq!(region.code().parse::<Region>(), Ok(region));
        }
    }

    #[test]
    fn region_parse_is_case_insensitive() {
        assert_eq!("au".parse::<Region>(), Ok(Region::Au));
        assert_eq!("Sg".parse::<Region>(), Ok(Region::Sg));
        assert!("EU".parse::<Region>().is_err());
    }

    #[test]
    fn principals_are_distinct() {
        let mut seen = std::collections::HashSet::new();
        for region in Region::ALL {
            assert!(seen.insert(region.principal().object_id));
        }
    }
}
