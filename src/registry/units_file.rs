//! Configuration data structures used in [`RegistryBuilder`](super::RegistryBuilder)

use enum_map::EnumMap;
use serde::Deserialize;

/// Units and prefixes to add to a [`RegistryBuilder`](super::RegistryBuilder)
///
/// This structure is designed for deserializing [TOML](https://toml.io/en/),
/// but you can try other formats supported by serde.
///
/// ```toml
/// name = "example"
///
/// [[unit]]
/// symbol = "m"
///
/// [[unit]]
/// symbol = "ft"
/// aliases = ["foot", "feet"]
/// definition = "0.3048 m"
/// ```
#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct UnitsFile {
    /// Name of the registry
    pub name: Option<String>,
    /// [SI] prefixes
    ///
    /// [SI]: https://en.wikipedia.org/wiki/International_System_of_Units
    pub si: Option<SI>,
    /// Custom prefixes
    #[serde(default)]
    pub prefix: Vec<PrefixEntry>,
    /// Declare new units
    ///
    /// The order does not matter, a unit can be defined from units declared
    /// after it.
    #[serde(default)]
    pub unit: Vec<UnitEntry>,
}

/// [SI] configuration used in [`UnitsFile`]
///
/// [SI]: https://en.wikipedia.org/wiki/International_System_of_Units
#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SI {
    /// Symbols for each prefix
    ///
    /// The first symbol is the one used to build the unit symbol, the rest
    /// are aliases. An empty list skips the prefix.
    pub prefixes: Option<EnumMap<SiPrefix, Vec<String>>>,
}

/// [SI] supported prefixes
///
/// [SI]: https://en.wikipedia.org/wiki/International_System_of_Units
#[derive(
    Debug,
    Deserialize,
    Clone,
    Copy,
    strum::Display,
    strum::AsRefStr,
    enum_map::Enum,
    PartialEq,
    Eq,
    Hash,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum SiPrefix {
    Yotta,
    Zetta,
    Exa,
    Peta,
    Tera,
    Giga,
    Mega,
    Kilo,
    Hecto,
    Deca,
    Deci,
    Centi,
    Milli,
    Micro,
    Nano,
    Pico,
    Femto,
    Atto,
    Zepto,
    Yocto,
}

impl SiPrefix {
    /// All prefixes, from the largest to the smallest
    pub const ALL: [SiPrefix; 20] = [
        SiPrefix::Yotta,
        SiPrefix::Zetta,
        SiPrefix::Exa,
        SiPrefix::Peta,
        SiPrefix::Tera,
        SiPrefix::Giga,
        SiPrefix::Mega,
        SiPrefix::Kilo,
        SiPrefix::Hecto,
        SiPrefix::Deca,
        SiPrefix::Deci,
        SiPrefix::Centi,
        SiPrefix::Milli,
        SiPrefix::Micro,
        SiPrefix::Nano,
        SiPrefix::Pico,
        SiPrefix::Femto,
        SiPrefix::Atto,
        SiPrefix::Zepto,
        SiPrefix::Yocto,
    ];

    /// Get the ratio of the prefix
    ///
    /// ```
    /// # use dimensional::registry::units_file::SiPrefix;
    /// assert_eq!(SiPrefix::Kilo.ratio(), 1000.0);
    /// ```
    pub fn ratio(&self) -> f64 {
        match self {
            SiPrefix::Yotta => 1e24,
            SiPrefix::Zetta => 1e21,
            SiPrefix::Exa => 1e18,
            SiPrefix::Peta => 1e15,
            SiPrefix::Tera => 1e12,
            SiPrefix::Giga => 1e9,
            SiPrefix::Mega => 1e6,
            SiPrefix::Kilo => 1e3,
            SiPrefix::Hecto => 1e2,
            SiPrefix::Deca => 1e1,
            SiPrefix::Deci => 1e-1,
            SiPrefix::Centi => 1e-2,
            SiPrefix::Milli => 1e-3,
            SiPrefix::Micro => 1e-6,
            SiPrefix::Nano => 1e-9,
            SiPrefix::Pico => 1e-12,
            SiPrefix::Femto => 1e-15,
            SiPrefix::Atto => 1e-18,
            SiPrefix::Zepto => 1e-21,
            SiPrefix::Yocto => 1e-24,
        }
    }

    /// Standard symbol of the prefix
    pub fn symbol(&self) -> &'static str {
        match self {
            SiPrefix::Yotta => "Y",
            SiPrefix::Zetta => "Z",
            SiPrefix::Exa => "E",
            SiPrefix::Peta => "P",
            SiPrefix::Tera => "T",
            SiPrefix::Giga => "G",
            SiPrefix::Mega => "M",
            SiPrefix::Kilo => "k",
            SiPrefix::Hecto => "h",
            SiPrefix::Deca => "da",
            SiPrefix::Deci => "d",
            SiPrefix::Centi => "c",
            SiPrefix::Milli => "m",
            SiPrefix::Micro => "µ",
            SiPrefix::Nano => "n",
            SiPrefix::Pico => "p",
            SiPrefix::Femto => "f",
            SiPrefix::Atto => "a",
            SiPrefix::Zepto => "z",
            SiPrefix::Yocto => "y",
        }
    }
}

/// A custom prefix
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct PrefixEntry {
    /// Symbol. For example: `Ki`
    pub symbol: String,
    /// Multiplier. For example: `1024`
    pub multiplier: f64,
    /// Other symbols for the prefix
    #[serde(default)]
    pub aliases: Vec<String>,
}

/// A new unit
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct UnitEntry {
    /// Symbol. For example: `N`
    ///
    /// This is the one used when formatting.
    pub symbol: String,
    /// Other ways to write the unit, used only when parsing.
    #[serde(default)]
    pub aliases: Vec<String>,
    /// Quantity this unit equals. For example: `1 kg m/s^2`
    ///
    /// Without a definition the unit is primitive.
    pub definition: Option<String>,
}

#[cfg(feature = "toml")]
impl UnitsFile {
    /// Parse a units file in [TOML](https://toml.io/en/)
    ///
    /// This is only available with the `toml` feature.
    pub fn from_toml(text: &str) -> Result<Self, UnitsFileError> {
        Ok(toml::from_str(text)?)
    }
}

/// Errors reading a [`UnitsFile`]
#[cfg(feature = "toml")]
#[derive(Debug, thiserror::Error)]
pub enum UnitsFileError {
    #[error("Error reading units file: {0}")]
    Toml(#[from] toml::de::Error),
}
