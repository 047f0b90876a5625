use serde::Serialize;

use super::error::DecodeError;
use super::firmware::FirmwareVersion;
use super::layout;
use super::reader::UplinkReader;

/// Device information uplink (port 4), selected by payload length.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum DeviceInformation {
    FirmwareVersion {
        firmware_version: FirmwareVersion,
    },
    DeviceUrn {
        #[serde(rename = "devEUI")]
        dev_eui: String,
        #[serde(rename = "productClass")]
        product_class: ProductClass,
    },
    Unrecognized,
}

impl DeviceInformation {
    pub fn label(&self) -> Option<&'static str> {
        match self {
            Self::FirmwareVersion { .. } => Some("Firmware version"),
            Self::DeviceUrn { .. } => Some("Device URN"),
            Self::Unrecognized => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductClass {
    pub product_code: ProductCode,
    pub variant_code: u8,
    pub extension: BandExtension,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ProductCode {
    /// Parking lot sensor.
    #[serde(rename = "PLS")]
    Pls,
    Unknown,
}

/// Regional radio band encoded in the product class extension byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BandExtension {
    #[serde(rename = "EU868")]
    Eu868,
    #[serde(rename = "AS923")]
    As923,
    Unknown,
}

impl BandExtension {
    pub fn from_raw(value: u8) -> Self {
        match value {
            layout::EXTENSION_EU868 => Self::Eu868,
            layout::EXTENSION_AS923 => Self::As923,
            _ => Self::Unknown,
        }
    }
}

pub fn parse_device_information(payload: &[u8]) -> Result<DeviceInformation, DecodeError> {
    let reader = UplinkReader::new(payload);
    match payload.len() {
        layout::DEVICE_INFO_FIRMWARE_LEN => Ok(DeviceInformation::FirmwareVersion {
            firmware_version: FirmwareVersion::from(
                reader.read_array::<3>(layout::DEVICE_INFO_FIRMWARE_RANGE)?,
            ),
        }),
        layout::DEVICE_INFO_URN_LEN => {
            let mut dev_eui = reader.read_hex_unpadded(layout::DEV_EUI_HEAD_RANGE)?;
            dev_eui.push_str(&reader.read_hex_unpadded(layout::DEV_EUI_TAIL_RANGE)?);
            let product_class = parse_product_class(&reader)?;
            Ok(DeviceInformation::DeviceUrn {
                dev_eui,
                product_class,
            })
        }
        _ => Ok(DeviceInformation::Unrecognized),
    }
}

fn parse_product_class(reader: &UplinkReader<'_>) -> Result<ProductClass, DecodeError> {
    let class = reader.read_u8(layout::PRODUCT_CLASS_OFFSET)?;
    let high = reader.read_u8(layout::PRODUCT_CODE_HIGH_OFFSET)?;
    let code = (u16::from(high) << 4) | u16::from(class >> 4);
    let product_code = if code == layout::PRODUCT_CODE_PLS {
        ProductCode::Pls
    } else {
        ProductCode::Unknown
    };

    Ok(ProductClass {
        product_code,
        variant_code: class & 0x0F,
        extension: BandExtension::from_raw(reader.read_u8(layout::PRODUCT_EXTENSION_OFFSET)?),
    })
}
