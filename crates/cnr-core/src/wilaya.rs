//! # Wilaya — administrative region identifiers
//!
//! The 58 Algerian wilayas, keyed by their official numeric code. Region
//! filtering always compares codes: wilaya names carry diacritics and the
//! backend is not consistent about their encoding, so a name comparison is
//! never authoritative.

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Official code + French name for each of the 58 wilayas, in code order.
const WILAYAS: [(u8, &str); 58] = [
    (1, "Adrar"),
    (2, "Chlef"),
    (3, "Laghouat"),
    (4, "Oum El Bouaghi"),
    (5, "Batna"),
    (6, "Béjaïa"),
    (7, "Biskra"),
    (8, "Béchar"),
    (9, "Blida"),
    (10, "Bouira"),
    (11, "Tamanrasset"),
    (12, "Tébessa"),
    (13, "Tlemcen"),
    (14, "Tiaret"),
    (15, "Tizi Ouzou"),
    (16, "Alger"),
    (17, "Djelfa"),
    (18, "Jijel"),
    (19, "Sétif"),
    (20, "Saïda"),
    (21, "Skikda"),
    (22, "Sidi Bel Abbès"),
    (23, "Annaba"),
    (24, "Guelma"),
    (25, "Constantine"),
    (26, "Médéa"),
    (27, "Mostaganem"),
    (28, "M'Sila"),
    (29, "Mascara"),
    (30, "Ouargla"),
    (31, "Oran"),
    (32, "El Bayadh"),
    (33, "Illizi"),
    (34, "Bordj Bou Arréridj"),
    (35, "Boumerdès"),
    (36, "El Tarf"),
    (37, "Tindouf"),
    (38, "Tissemsilt"),
    (39, "El Oued"),
    (40, "Khenchela"),
    (41, "Souk Ahras"),
    (42, "Tipaza"),
    (43, "Mila"),
    (44, "Aïn Defla"),
    (45, "Naâma"),
    (46, "Aïn Témouchent"),
    (47, "Ghardaïa"),
    (48, "Relizane"),
    (49, "Timimoun"),
    (50, "Bordj Badji Mokhtar"),
    (51, "Ouled Djellal"),
    (52, "Béni Abbès"),
    (53, "In Salah"),
    (54, "In Guezzam"),
    (55, "Touggourt"),
    (56, "Djanet"),
    (57, "El M'Ghair"),
    (58, "El Menia"),
];

/// One administrative region: a numeric code in 1..=58 and its name.
///
/// Constructed only through [`Wilaya::from_code`] or [`Wilaya::by_name`],
/// so a `Wilaya` always refers to a real region. On the wire a wilaya is
/// just its code, in both directions; the name is looked up on
/// deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Wilaya {
    code: u8,
    name: &'static str,
}

impl Wilaya {
    /// Resolve a wilaya from its official code.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::UnknownWilayaCode`] if the code is outside
    /// 1..=58.
    pub fn from_code(code: u8) -> Result<Self, DomainError> {
        if code == 0 || code as usize > WILAYAS.len() {
            return Err(DomainError::UnknownWilayaCode(code));
        }
        let (c, name) = WILAYAS[code as usize - 1];
        debug_assert_eq!(c, code);
        Ok(Self { code, name })
    }

    /// Resolve a wilaya from its French name (exact match).
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::UnknownWilayaName`] if no region carries the
    /// name.
    pub fn by_name(name: &str) -> Result<Self, DomainError> {
        WILAYAS
            .iter()
            .find(|(_, n)| *n == name)
            .map(|&(code, name)| Self { code, name })
            .ok_or_else(|| DomainError::UnknownWilayaName(name.to_string()))
    }

    /// Iterate over all 58 wilayas in code order.
    pub fn all() -> impl Iterator<Item = Wilaya> {
        WILAYAS.iter().map(|&(code, name)| Wilaya { code, name })
    }

    /// The official numeric code (1..=58).
    pub fn code(&self) -> u8 {
        self.code
    }

    /// The French name of the region.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl std::fmt::Display for Wilaya {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.code)
    }
}

impl Serialize for Wilaya {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_u8(self.code)
    }
}

impl<'de> Deserialize<'de> for Wilaya {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let code = u8::deserialize(deserializer)?;
        Self::from_code(code).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_code_resolves_known_regions() {
        let alger = Wilaya::from_code(16).unwrap();
        assert_eq!(alger.code(), 16);
        assert_eq!(alger.name(), "Alger");

        let adrar = Wilaya::from_code(1).unwrap();
        assert_eq!(adrar.name(), "Adrar");

        let el_menia = Wilaya::from_code(58).unwrap();
        assert_eq!(el_menia.name(), "El Menia");
    }

    #[test]
    fn from_code_rejects_out_of_range() {
        assert!(Wilaya::from_code(0).is_err());
        assert!(Wilaya::from_code(59).is_err());
        assert!(Wilaya::from_code(255).is_err());
    }

    #[test]
    fn by_name_matches_exactly() {
        let oran = Wilaya::by_name("Oran").unwrap();
        assert_eq!(oran.code(), 31);
        // Diacritics matter; there is no fuzzy matching on purpose.
        assert!(Wilaya::by_name("Bejaia").is_err());
        assert!(Wilaya::by_name("Béjaïa").is_ok());
    }

    #[test]
    fn all_yields_58_regions_in_code_order() {
        let all: Vec<_> = Wilaya::all().collect();
        assert_eq!(all.len(), 58);
        for (i, w) in all.iter().enumerate() {
            assert_eq!(w.code() as usize, i + 1);
        }
    }

    #[test]
    fn deserialize_validates_code() {
        let w: Wilaya = serde_json::from_str("16").unwrap();
        assert_eq!(w.name(), "Alger");
        assert!(serde_json::from_str::<Wilaya>("99").is_err());
    }

    #[test]
    fn serializes_as_bare_code_and_round_trips() {
        let oran = Wilaya::from_code(31).unwrap();
        assert_eq!(serde_json::to_string(&oran).unwrap(), "31");

        let back: Wilaya = serde_json::from_str(&serde_json::to_string(&oran).unwrap()).unwrap();
        assert_eq!(back, oran);
        assert_eq!(back.name(), "Oran");
    }
}
