//! Contents.json data model for an Xcode app icon set
//!
//! Only the fields needed to describe a single-size app icon are modelled.
//! Current Xcode versions accept one 1024x1024 `universal` image with
//! `platform: ios` and derive every other size from it.

use serde::Serialize;

/// Root structure of a Contents.json file
#[derive(Serialize, Debug, Clone)]
pub struct ContentsFile {
    pub images: Vec<ImageEntry>,

    /// Versioning and authorship information
    pub info: Info,
}

/// Individual image entry within an asset catalog
#[derive(Serialize, Debug, Clone)]
pub struct ImageEntry {
    pub filename: String,

    /// The device type for the image (e.g., "universal", "iphone", "ipad")
    pub idiom: String,

    /// Target platform when `idiom` is "universal"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,

    /// The size of the image in points (e.g., "1024x1024")
    pub size: String,

    /// The scale factor, omitted for single-size icons
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale: Option<String>,
}

#[derive(Serialize, Debug, Clone)]
pub struct Info {
    /// The format version of the asset catalog (always 1)
    pub version: u8,
    pub author: String,
}

impl ContentsFile {
    pub fn new(author: String) -> Self {
        Self {
            images: Vec::new(),
            info: Info { version: 1, author },
        }
    }

    pub fn add_image(&mut self, image: ImageEntry) {
        self.images.push(image);
    }
}

impl ImageEntry {
    /// Single-size iOS app icon entry for a square image of `size` pixels
    pub fn universal_app_icon(filename: String, size: u32) -> Self {
        Self {
            filename,
            idiom: "universal".to_string(),
            platform: Some("ios".to_string()),
            size: format!("{size}x{size}"),
            scale: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contents_file_creation() {
        let contents = ContentsFile::new("flow-icon".to_string());
        assert_eq!(contents.info.author, "flow-icon");
        assert_eq!(contents.info.version, 1);
        assert!(contents.images.is_empty());
    }

    #[test]
    fn test_single_entry_json_serialization() {
        let mut contents = ContentsFile::new("flow-icon".to_string());
        contents.add_image(ImageEntry::universal_app_icon(
            "AppIcon-1024x1024.png".to_string(),
            1024,
        ));

        let json = serde_json::to_string_pretty(&contents).unwrap();
        let parsed: serde_json::Value =
            serde_json::from_str(&json).expect("Generated JSON should be valid");

        assert_eq!(parsed["images"].as_array().unwrap().len(), 1);
        let image = &parsed["images"][0];
        assert_eq!(image["filename"], "AppIcon-1024x1024.png");
        assert_eq!(image["idiom"], "universal");
        assert_eq!(image["platform"], "ios");
        assert_eq!(image["size"], "1024x1024");
        assert!(image.get("scale").is_none(), "scale should be omitted:\n{json}");

        assert_eq!(parsed["info"]["version"], 1);
        assert_eq!(parsed["info"]["author"], "flow-icon");
    }
}
