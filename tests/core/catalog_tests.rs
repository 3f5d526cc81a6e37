//! Tests for the attribute catalog
//!
//! Tests cover:
//! - Canonical names of well-known attributes
//! - Synthetic names for unknown ids
//! - Catalog completeness

use smartplot::catalog::{Attribute, AttributeName};
use strum::IntoEnumIterator;

#[test]
fn test_common_attribute_names() {
    let expected = [
        (1, "Raw_Read_Error_Rate"),
        (9, "Power_On_Hours"),
        (190, "Airflow_Temperature_Cel"),
        (194, "Temperature_Celsius"),
        (197, "Current_Pending_Sector"),
        (199, "UDMA_CRC_Error_Count"),
        (240, "Head_Flying_Hours"),
        (242, "Total_LBAs_Read"),
    ];
    for (id, name) in expected {
        assert_eq!(AttributeName::resolve(id).to_string(), name, "id {}", id);
    }
}

#[test]
fn test_unknown_attribute_names() {
    for id in [0u8, 6, 13, 170, 254, 255] {
        let name = AttributeName::resolve(id);
        assert!(!name.is_known());
        assert_eq!(name.id(), id);
        assert_eq!(name.to_string(), format!("Unknown_HDD_Attribute_{}", id));
    }
}

#[test]
fn test_resolve_is_total() {
    for id in 0..=u8::MAX {
        let name = AttributeName::resolve(id);
        assert_eq!(name.id(), id);
        assert!(!name.to_string().is_empty());
    }
}

#[test]
fn test_catalog_names_are_unique() {
    let mut names: Vec<String> = Attribute::iter().map(|a| a.as_ref().to_string()).collect();
    let total = names.len();
    names.sort();
    names.dedup();
    assert_eq!(names.len(), total);
}

#[test]
fn test_catalog_ids_roundtrip() {
    for attr in Attribute::iter() {
        assert_eq!(Attribute::from_repr(attr.id()), Some(attr));
    }
    assert_eq!(Attribute::from_repr(6), None);
}
