//! Typed form payload and the two form modes the server accepts.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Crops the yield model knows, in the server's label order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Crop {
    Rice,
    Maize,
    Chickpea,
    Kidneybeans,
    Pigeonpeas,
    Mothbeans,
    Mungbean,
    Blackgram,
    Lentil,
    Pomegranate,
    Banana,
    Mango,
    Grapes,
    Watermelon,
    Muskmelon,
    Apple,
    Orange,
    Papaya,
    Coconut,
    Cotton,
    Jute,
    Coffee,
}

impl Crop {
    pub const ALL: [Crop; 22] = [
        Crop::Rice,
        Crop::Maize,
        Crop::Chickpea,
        Crop::Kidneybeans,
        Crop::Pigeonpeas,
        Crop::Mothbeans,
        Crop::Mungbean,
        Crop::Blackgram,
        Crop::Lentil,
        Crop::Pomegranate,
        Crop::Banana,
        Crop::Mango,
        Crop::Grapes,
        Crop::Watermelon,
        Crop::Muskmelon,
        Crop::Apple,
        Crop::Orange,
        Crop::Papaya,
        Crop::Coconut,
        Crop::Cotton,
        Crop::Jute,
        Crop::Coffee,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Crop::Rice => "rice",
            Crop::Maize => "maize",
            Crop::Chickpea => "chickpea",
            Crop::Kidneybeans => "kidneybeans",
            Crop::Pigeonpeas => "pigeonpeas",
            Crop::Mothbeans => "mothbeans",
            Crop::Mungbean => "mungbean",
            Crop::Blackgram => "blackgram",
            Crop::Lentil => "lentil",
            Crop::Pomegranate => "pomegranate",
            Crop::Banana => "banana",
            Crop::Mango => "mango",
            Crop::Grapes => "grapes",
            Crop::Watermelon => "watermelon",
            Crop::Muskmelon => "muskmelon",
            Crop::Apple => "apple",
            Crop::Orange => "orange",
            Crop::Papaya => "papaya",
            Crop::Coconut => "coconut",
            Crop::Cotton => "cotton",
            Crop::Jute => "jute",
            Crop::Coffee => "coffee",
        }
    }

    /// Label for the crop picker, e.g. `Kidneybeans`.
    pub fn title(&self) -> String {
        let name = self.as_str();
        let mut chars = name.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

impl fmt::Display for Crop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Crop {
    type Err = ReadingError;

    /// Case-insensitive and whitespace-tolerant, as the server normalizes.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Crop::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == wanted)
            .ok_or_else(|| ReadingError::UnknownCrop(s.to_string()))
    }
}

/// Which form the controller renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormMode {
    #[default]
    Recommend,
    Yield,
}

impl FormMode {
    /// Parse the mount element's `data-mode`; anything unknown falls back to
    /// the recommendation form.
    pub fn from_attr(attr: Option<&str>) -> Self {
        match attr.map(|a| a.trim().to_ascii_lowercase()).as_deref() {
            Some("yield") => FormMode::Yield,
            _ => FormMode::Recommend,
        }
    }

    pub fn action(&self) -> &'static str {
        match self {
            FormMode::Recommend => "/predict",
            FormMode::Yield => "/predict_yield",
        }
    }

    pub fn submit_label(&self) -> &'static str {
        match self {
            FormMode::Recommend => "Get Recommendation",
            FormMode::Yield => "Predict Yield",
        }
    }

    pub fn needs_crop(&self) -> bool {
        matches!(self, FormMode::Yield)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ReadingError {
    MissingField(&'static str),
    InvalidNumber { field: String, raw: String },
    UnknownCrop(String),
}

impl fmt::Display for ReadingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReadingError::MissingField(name) => write!(f, "Missing form field '{}'", name),
            ReadingError::InvalidNumber { field, raw } => {
                write!(f, "Field '{}' is not a number: {:?}", field, raw)
            }
            ReadingError::UnknownCrop(raw) => write!(f, "Unknown crop '{}'", raw),
        }
    }
}

impl std::error::Error for ReadingError {}

/// One submission: the seven slider values plus the crop for yield requests.
///
/// Field names serialize exactly as the server reads them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoilReading {
    #[serde(rename = "N")]
    pub n: f64,
    #[serde(rename = "P")]
    pub p: f64,
    #[serde(rename = "K")]
    pub k: f64,
    pub temperature: f64,
    pub humidity: f64,
    pub ph: f64,
    pub rainfall: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<Crop>,
}

fn field<'a>(pairs: &[(&'a str, &'a str)], name: &'static str) -> Result<&'a str, ReadingError> {
    pairs
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, v)| *v)
        .ok_or(ReadingError::MissingField(name))
}

fn parse_number(pairs: &[(&str, &str)], name: &'static str) -> Result<f64, ReadingError> {
    let raw = field(pairs, name)?;
    raw.trim()
        .parse::<f64>()
        .map_err(|_| ReadingError::InvalidNumber {
            field: name.to_string(),
            raw: raw.to_string(),
        })
}

impl SoilReading {
    /// Build from `(field, raw value)` pairs as found in the form.
    pub fn from_fields<'a, I>(fields: I, mode: FormMode) -> Result<Self, ReadingError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let pairs: Vec<(&str, &str)> = fields.into_iter().collect();
        let number = |name: &'static str| parse_number(&pairs, name);

        let label = if mode.needs_crop() {
            Some(field(&pairs, "label")?.parse::<Crop>()?)
        } else {
            None
        };

        Ok(Self {
            n: number("N")?,
            p: number("P")?,
            k: number("K")?,
            temperature: number("temperature")?,
            humidity: number("humidity")?,
            ph: number("ph")?,
            rainfall: number("rainfall")?,
            label,
        })
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
