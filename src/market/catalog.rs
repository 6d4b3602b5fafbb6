//! LoRA NFT listing catalog.

use std::str::FromStr;

/// Listing category shown as a filter chip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    Character,
    Style,
    Background,
}

impl Tag {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Tag::Character => "Character",
            Tag::Style => "Style",
            Tag::Background => "Background",
        }
    }
}

impl FromStr for Tag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "character" => Ok(Tag::Character),
            "style" => Ok(Tag::Style),
            "background" => Ok(Tag::Background),
            other => Err(format!("unknown tag: {other}")),
        }
    }
}

/// One LoRA NFT on the marketplace front page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoraListing {
    pub id: u32,
    pub name: &'static str,
    pub image: &'static str,
    pub creator: &'static str,
    pub tag: Tag,
    /// Usage price in ⚡.
    pub price: f64,
}

const LISTINGS: [LoraListing; 3] = [
    LoraListing {
        id: 1,
        name: "Nishikigi Chisato [10 outfits] | Illustrious | Lycoris Recoil",
        image: "/assets/images/placeholders/0.webp",
        creator: "LittleJelly",
        tag: Tag::Character,
        price: 1.0,
    },
    LoraListing {
        id: 2,
        name: "Inoue Takina [6 outfits] | Illustrious | Lycoris Recoil",
        image: "/assets/images/placeholders/1.webp",
        creator: "MidnightDream",
        tag: Tag::Character,
        price: 1.0,
    },
    LoraListing {
        id: 3,
        name: "Illustrious Gehenna [Illustrious Checkpoint]",
        image: "/assets/images/placeholders/2.webp",
        creator: "Hulda",
        tag: Tag::Style,
        price: 1.0,
    },
];

/// Every listing, in display order.
#[must_use]
pub fn listings() -> &'static [LoraListing] {
    &LISTINGS
}

/// Listings matching the tag filter; `None` means "All".
#[must_use]
pub fn filter_by_tag(tag: Option<Tag>) -> Vec<&'static LoraListing> {
    LISTINGS
        .iter()
        .filter(|listing| tag.is_none_or(|t| listing.tag == t))
        .collect()
}

/// Look a listing up by its display name.
#[must_use]
pub fn by_name(name: &str) -> Option<&'static LoraListing> {
    LISTINGS.iter().find(|listing| listing.name == name)
}

#[cfg(test)]
#[path = "catalog_test.rs"]
mod tests;
