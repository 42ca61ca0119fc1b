//! Free-text input normalization.
//!
//! Upstream order records often carry the product type, size, and color
//! buried in a free-text description ("Full Colour A4 x 50"). Extraction
//! happens here, as a separate stage that produces clean enum values
//! before anything reaches the optimization engine — the engine itself
//! never parses text.

use std::str::FromStr;

use crate::models::{ColorVariant, ProductType, TransferSize};

/// Error for an unrecognized tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseTagError {
    /// The text that failed to parse.
    pub input: String,
    /// What was being parsed ("product type", "size", "color").
    pub expected: &'static str,
}

impl std::fmt::Display for ParseTagError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unrecognized {}: '{}'", self.expected, self.input)
    }
}

impl std::error::Error for ParseTagError {}

fn canon(s: &str) -> String {
    s.trim()
        .to_ascii_lowercase()
        .replace([' ', '-', '_'], "")
}

impl FromStr for ProductType {
    type Err = ParseTagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match canon(s).as_str() {
            "fullcolour" | "fullcolor" => Ok(ProductType::FullColour),
            "singlecolour" | "singlecolor" => Ok(ProductType::SingleColour),
            "metal" => Ok(ProductType::Metal),
            "zero" => Ok(ProductType::Zero),
            _ => Err(ParseTagError {
                input: s.to_string(),
                expected: "product type",
            }),
        }
    }
}

impl FromStr for TransferSize {
    type Err = ParseTagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match canon(s).replace("mm", "").as_str() {
            "a3" => Ok(TransferSize::A3),
            "a4" => Ok(TransferSize::A4),
            "a5" => Ok(TransferSize::A5),
            "a6" => Ok(TransferSize::A6),
            "295x100" => Ok(TransferSize::S295x100),
            "95x95" => Ok(TransferSize::S95x95),
            "100x70" => Ok(TransferSize::S100x70),
            "60x60" => Ok(TransferSize::S60x60),
            "290x140" => Ok(TransferSize::S290x140),
            _ => Err(ParseTagError {
                input: s.to_string(),
                expected: "size",
            }),
        }
    }
}

impl FromStr for ColorVariant {
    type Err = ParseTagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        use ColorVariant::*;
        match canon(s).as_str() {
            "white" => Ok(White),
            "black" => Ok(Black),
            "red" => Ok(Red),
            "blue" => Ok(Blue),
            "green" => Ok(Green),
            "yellow" => Ok(Yellow),
            "orange" => Ok(Orange),
            "purple" => Ok(Purple),
            "silver" => Ok(Silver),
            "gold" => Ok(Gold),
            _ => Err(ParseTagError {
                input: s.to_string(),
                expected: "color",
            }),
        }
    }
}

/// Attributes extracted from a free-text product description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedTitle {
    pub product_type: Option<ProductType>,
    pub size: Option<TransferSize>,
    pub color: Option<ColorVariant>,
    pub quantity: Option<u32>,
}

/// Scans a product description for recognizable tags.
///
/// Matches multi-word product types first ("full colour", "single
/// colour"), then size and color tokens, and a trailing `x<count>`
/// quantity marker. Unmatched fields come back as `None` — the caller
/// decides whether a partially classified title is usable.
pub fn classify(title: &str) -> ClassifiedTitle {
    let flat = canon(title);

    let product_type = if flat.contains("fullcolour") || flat.contains("fullcolor") {
        Some(ProductType::FullColour)
    } else if flat.contains("singlecolour") || flat.contains("singlecolor") {
        Some(ProductType::SingleColour)
    } else if flat.contains("metal") {
        Some(ProductType::Metal)
    } else if flat.contains("zero") {
        Some(ProductType::Zero)
    } else {
        None
    };

    let mut size = None;
    let mut color = None;
    let mut quantity = None;

    for token in title.split_whitespace() {
        let token = token.trim_matches(|c: char| !c.is_ascii_alphanumeric());
        if size.is_none() {
            if let Ok(s) = token.parse::<TransferSize>() {
                size = Some(s);
            }
        }
        if color.is_none() {
            if let Ok(c) = token.parse::<ColorVariant>() {
                color = Some(c);
            }
        }
        if quantity.is_none() {
            if let Some(count) = token.strip_prefix(['x', 'X']) {
                if let Ok(n) = count.parse::<u32>() {
                    quantity = Some(n);
                }
            }
        }
    }

    ClassifiedTitle {
        product_type,
        size,
        color,
        quantity,
    }
}
