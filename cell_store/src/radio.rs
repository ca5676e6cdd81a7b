use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Radio technology of a cell or measurement. The stored codes are fixed and
/// must never be renumbered once rows exist.
#[derive(Debug, Eq, Hash, PartialEq, Copy, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RadioType {
    Gsm = 0,
    Cdma = 1,
    Umts = 2,
    Lte = 3,
}

impl RadioType {
    pub const ALL: [RadioType; 4] = [Self::Gsm, Self::Cdma, Self::Umts, Self::Lte];

    /// Radio names in definition order.
    pub fn names() -> [&'static str; 4] {
        Self::ALL.map(Self::as_str)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Gsm => "gsm",
            Self::Cdma => "cdma",
            Self::Umts => "umts",
            Self::Lte => "lte",
        }
    }

    pub(crate) fn code(self) -> i16 {
        self as i16
    }

    pub(crate) fn from_code(code: i16) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|radio| radio.code() == code)
            .ok_or(Error::InvalidRadioCode(code))
    }
}

impl FromStr for RadioType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "gsm" => Ok(Self::Gsm),
            "cdma" => Ok(Self::Cdma),
            "umts" => Ok(Self::Umts),
            "lte" => Ok(Self::Lte),
            other => Err(Error::InvalidRadioType(other.to_string())),
        }
    }
}

impl fmt::Display for RadioType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn names_map_onto_codes() {
        let codes: HashSet<i16> = RadioType::names()
            .into_iter()
            .map(|name| name.parse::<RadioType>().unwrap().code())
            .collect();
        assert_eq!(codes, HashSet::from([0, 1, 2, 3]));
    }

    #[test]
    fn names_in_definition_order() {
        assert_eq!(RadioType::names(), ["gsm", "cdma", "umts", "lte"]);
    }

    #[test]
    fn stored_codes_are_stable() {
        assert_eq!(RadioType::Gsm.code(), 0);
        assert_eq!(RadioType::Cdma.code(), 1);
        assert_eq!(RadioType::Umts.code(), 2);
        assert_eq!(RadioType::Lte.code(), 3);
        for radio in RadioType::ALL {
            assert_eq!(RadioType::from_code(radio.code()).unwrap(), radio);
        }
    }

    #[test]
    fn unknown_name_fails() {
        assert!(matches!(
            "wcdma".parse::<RadioType>(),
            Err(Error::InvalidRadioType(name)) if name == "wcdma"
        ));
        assert!("GSM".parse::<RadioType>().is_err());
    }

    #[test]
    fn unknown_code_fails() {
        assert!(matches!(
            RadioType::from_code(4),
            Err(Error::InvalidRadioCode(4))
        ));
        assert!(RadioType::from_code(-1).is_err());
    }

    #[test]
    fn serde_uses_names() {
        assert_eq!(serde_json::to_string(&RadioType::Lte).unwrap(), "\"lte\"");
        let radio: RadioType = serde_json::from_str("\"umts\"").unwrap();
        assert_eq!(radio, RadioType::Umts);
    }
}
