use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Storage class of an uploaded file. Decides which upload endpoint is used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UploadFileType {
    Image,
    Attachment,
}

impl UploadFileType {
    pub fn as_str(&self) -> &'static str {
        match self {
            UploadFileType::Image => "IMAGE",
            UploadFileType::Attachment => "ATTACHMENT",
        }
    }

    /// File picker hint for this type: any image, or the office/archive formats
    /// accepted as attachments.
    pub fn accept_hint(&self) -> &'static str {
        match self {
            UploadFileType::Image => "image/*",
            UploadFileType::Attachment => ".pdf,.doc,.docx,.xls,.xlsx,.zip",
        }
    }
}

impl fmt::Display for UploadFileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UploadFileType {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "IMAGE" | "IMAGES" => Ok(UploadFileType::Image),
            "ATTACHMENT" | "ATTACHMENTS" => Ok(UploadFileType::Attachment),
            _ => Err(ModelError::UnknownFileType(s.to_string())),
        }
    }
}

/// Business classification of an uploaded file.
///
/// Every category belongs to exactly one [`UploadFileType`]; see
/// [`UploadFileCategory::file_type`]. New categories must be added to that
/// match, which is exhaustive, so routing can never silently fall through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UploadFileCategory {
    // Attachments
    StoreRentContract,
    BusinessRegistration,
    BusinessLicense,
    StoreFloorPlan,
    EtcAttachment,
    // Images
    MenuImage,
    OrganizationLogoExpanded,
    OrganizationLogoCollapsed,
    StoreImage,
    EtcImage,
}

impl UploadFileCategory {
    pub const ALL: [UploadFileCategory; 10] = [
        UploadFileCategory::StoreRentContract,
        UploadFileCategory::BusinessRegistration,
        UploadFileCategory::BusinessLicense,
        UploadFileCategory::StoreFloorPlan,
        UploadFileCategory::EtcAttachment,
        UploadFileCategory::MenuImage,
        UploadFileCategory::OrganizationLogoExpanded,
        UploadFileCategory::OrganizationLogoCollapsed,
        UploadFileCategory::StoreImage,
        UploadFileCategory::EtcImage,
    ];

    /// Wire name, e.g. `STORE_RENT_CONTRACT`.
    pub fn as_str(&self) -> &'static str {
        match self {
            UploadFileCategory::StoreRentContract => "STORE_RENT_CONTRACT",
            UploadFileCategory::BusinessRegistration => "BUSINESS_REGISTRATION",
            UploadFileCategory::BusinessLicense => "BUSINESS_LICENSE",
            UploadFileCategory::StoreFloorPlan => "STORE_FLOOR_PLAN",
            UploadFileCategory::EtcAttachment => "ETC_ATTACHMENT",
            UploadFileCategory::MenuImage => "MENU_IMAGE",
            UploadFileCategory::OrganizationLogoExpanded => "ORGANIZATION_LOGO_EXPANDED",
            UploadFileCategory::OrganizationLogoCollapsed => "ORGANIZATION_LOGO_COLLAPSED",
            UploadFileCategory::StoreImage => "STORE_IMAGE",
            UploadFileCategory::EtcImage => "ETC_IMAGE",
        }
    }

    pub fn file_type(&self) -> UploadFileType {
        match self {
            UploadFileCategory::StoreRentContract
            | UploadFileCategory::BusinessRegistration
            | UploadFileCategory::BusinessLicense
            | UploadFileCategory::StoreFloorPlan
            | UploadFileCategory::EtcAttachment => UploadFileType::Attachment,
            UploadFileCategory::MenuImage
            | UploadFileCategory::OrganizationLogoExpanded
            | UploadFileCategory::OrganizationLogoCollapsed
            | UploadFileCategory::StoreImage
            | UploadFileCategory::EtcImage => UploadFileType::Image,
        }
    }

    pub fn is_image(&self) -> bool {
        self.file_type() == UploadFileType::Image
    }

    /// Categories offered for a given file type, in display order.
    pub fn for_type(file_type: UploadFileType) -> Vec<UploadFileCategory> {
        match file_type {
            UploadFileType::Image => vec![
                UploadFileCategory::StoreImage,
                UploadFileCategory::MenuImage,
                UploadFileCategory::OrganizationLogoExpanded,
                UploadFileCategory::OrganizationLogoCollapsed,
                UploadFileCategory::EtcImage,
            ],
            UploadFileType::Attachment => vec![
                UploadFileCategory::StoreRentContract,
                UploadFileCategory::BusinessRegistration,
                UploadFileCategory::BusinessLicense,
                UploadFileCategory::StoreFloorPlan,
                UploadFileCategory::EtcAttachment,
            ],
        }
    }

    pub fn image_categories() -> Vec<UploadFileCategory> {
        Self::for_type(UploadFileType::Image)
    }

    pub fn attachment_categories() -> Vec<UploadFileCategory> {
        Self::for_type(UploadFileType::Attachment)
    }

    /// Category preselected when switching to a file type.
    pub fn default_for(file_type: UploadFileType) -> UploadFileCategory {
        match file_type {
            UploadFileType::Image => UploadFileCategory::StoreImage,
            UploadFileType::Attachment => UploadFileCategory::StoreRentContract,
        }
    }

    /// Human label: `STORE_RENT_CONTRACT` -> `STORE RENT CONTRACT`.
    pub fn label(&self) -> String {
        self.as_str().replace('_', " ")
    }
}

impl fmt::Display for UploadFileCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UploadFileCategory {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase().replace(['-', ' '], "_");
        UploadFileCategory::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == normalized)
            .ok_or_else(|| ModelError::UnknownCategory(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn routing_matches_examples() {
        assert_eq!(
            UploadFileCategory::StoreImage.file_type(),
            UploadFileType::Image
        );
        assert_eq!(
            UploadFileCategory::OrganizationLogoExpanded.file_type(),
            UploadFileType::Image
        );
        assert_eq!(
            UploadFileCategory::StoreRentContract.file_type(),
            UploadFileType::Attachment
        );
    }

    #[test]
    fn explicit_mapping_agrees_with_name_convention() {
        // Historic rule: a name containing IMAGE or LOGO is an image category.
        for category in UploadFileCategory::ALL {
            let name = category.as_str();
            let by_name = name.contains("IMAGE") || name.contains("LOGO");
            assert_eq!(category.is_image(), by_name, "{}", name);
        }
    }

    #[test]
    fn type_partitions_cover_all_categories_once() {
        let images = UploadFileCategory::image_categories();
        let attachments = UploadFileCategory::attachment_categories();
        assert_eq!(images.len() + attachments.len(), UploadFileCategory::ALL.len());
        assert!(images.iter().all(|c| c.is_image()));
        assert!(attachments.iter().all(|c| !c.is_image()));
        for category in UploadFileCategory::ALL {
            assert!(images.contains(&category) ^ attachments.contains(&category));
        }
    }

    #[test]
    fn parse_accepts_wire_and_loose_forms() {
        assert_eq!(
            "STORE_FLOOR_PLAN".parse::<UploadFileCategory>().unwrap(),
            UploadFileCategory::StoreFloorPlan
        );
        assert_eq!(
            "organization-logo-collapsed"
                .parse::<UploadFileCategory>()
                .unwrap(),
            UploadFileCategory::OrganizationLogoCollapsed
        );
        assert!(matches!(
            "PROFILE_PHOTO".parse::<UploadFileCategory>(),
            Err(ModelError::UnknownCategory(_))
        ));
    }

    #[test]
    fn serde_uses_wire_names() {
        let json = serde_json::to_string(&UploadFileCategory::OrganizationLogoExpanded).unwrap();
        assert_eq!(json, "\"ORGANIZATION_LOGO_EXPANDED\"");
        let parsed: UploadFileType = serde_json::from_str("\"ATTACHMENT\"").unwrap();
        assert_eq!(parsed, UploadFileType::Attachment);
    }

    #[test]
    fn defaults_and_labels() {
        assert_eq!(
            UploadFileCategory::default_for(UploadFileType::Image),
            UploadFileCategory::StoreImage
        );
        assert_eq!(
            UploadFileCategory::default_for(UploadFileType::Attachment),
            UploadFileCategory::StoreRentContract
        );
        assert_eq!(UploadFileCategory::EtcAttachment.label(), "ETC ATTACHMENT");
        assert_eq!(UploadFileType::Image.accept_hint(), "image/*");
    }
}
