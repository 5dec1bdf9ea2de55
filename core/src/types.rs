//! Domain records for the postal backlog API.
//!
//! # Design
//! Field names follow the API's kebab-case wire names. Every record is
//! `#[serde(default)]` and every field reads `null` as its default, so a
//! server that omits or nulls fields still decodes; unknown fields are
//! ignored. Monetary amounts are integers in kopecks, masses in
//! grams, dimensions in centimetres, as the API sends them.

use serde::{Deserialize, Deserializer, Serialize};

/// Read `null` as the type's default value.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A shipment waiting in the sender's backlog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Order {
    #[serde(deserialize_with = "null_as_default")]
    pub id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub order_num: String,
    #[serde(deserialize_with = "null_as_default")]
    pub barcode: String,
    #[serde(deserialize_with = "null_as_default")]
    pub version: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub is_deleted: bool,

    // Recipient
    #[serde(deserialize_with = "null_as_default")]
    pub given_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub middle_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub surname: String,
    #[serde(deserialize_with = "null_as_default")]
    pub recipient_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub brand_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub tel_address: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub sms_notice_recipient: i64,

    // Destination address
    #[serde(deserialize_with = "null_as_default")]
    pub address_changed: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub manual_address_input: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub raw_address: String,
    #[serde(deserialize_with = "null_as_default")]
    pub address_type_to: String,
    #[serde(deserialize_with = "null_as_default")]
    pub num_address_type_to: String,
    #[serde(deserialize_with = "null_as_default")]
    pub index_to: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub str_index_to: String,
    #[serde(deserialize_with = "null_as_default")]
    pub region_to: String,
    #[serde(deserialize_with = "null_as_default")]
    pub area_to: String,
    #[serde(deserialize_with = "null_as_default")]
    pub place_to: String,
    #[serde(deserialize_with = "null_as_default")]
    pub location_to: String,
    #[serde(deserialize_with = "null_as_default")]
    pub street_to: String,
    #[serde(deserialize_with = "null_as_default")]
    pub house_to: String,
    #[serde(deserialize_with = "null_as_default")]
    pub building_to: String,
    #[serde(deserialize_with = "null_as_default")]
    pub corpus_to: String,
    #[serde(deserialize_with = "null_as_default")]
    pub slash_to: String,
    #[serde(deserialize_with = "null_as_default")]
    pub letter_to: String,
    #[serde(deserialize_with = "null_as_default")]
    pub room_to: String,
    #[serde(deserialize_with = "null_as_default")]
    pub office_to: String,
    #[serde(deserialize_with = "null_as_default")]
    pub hotel_to: String,
    #[serde(deserialize_with = "null_as_default")]
    pub vladenie_to: String,
    #[serde(deserialize_with = "null_as_default")]
    pub postoffice_code: String,
    #[serde(deserialize_with = "null_as_default")]
    pub mail_direct: i64,

    // Shipment
    #[serde(deserialize_with = "null_as_default")]
    pub mail_category: String,
    #[serde(deserialize_with = "null_as_default")]
    pub mail_rank: String,
    #[serde(deserialize_with = "null_as_default")]
    pub mail_type: String,
    #[serde(deserialize_with = "null_as_default")]
    pub envelope_type: String,
    #[serde(deserialize_with = "null_as_default")]
    pub transport_mode: String,
    #[serde(deserialize_with = "null_as_default")]
    pub transport_type: String,
    #[serde(deserialize_with = "null_as_default")]
    pub mass: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub dimension: Dimension,
    #[serde(deserialize_with = "null_as_default")]
    pub delivery_time: DeliveryTime,
    #[serde(deserialize_with = "null_as_default")]
    pub postmarks: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub goods: Goods,
    #[serde(deserialize_with = "null_as_default")]
    pub customs_declaration: CustomsDeclaration,
    #[serde(deserialize_with = "null_as_default")]
    pub comment: String,

    // Options
    #[serde(deserialize_with = "null_as_default")]
    pub completeness_checking: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub delivery_with_cod: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub insr_value: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub payment: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub payment_method: String,
    #[serde(deserialize_with = "null_as_default")]
    pub notice_payment_method: String,

    // Rates
    #[serde(deserialize_with = "null_as_default")]
    pub mass_rate: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub mass_rate_with_vat: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub mass_rate_wo_vat: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub avia_rate: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub avia_rate_with_vat: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub avia_rate_wo_vat: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub ground_rate: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub ground_rate_with_vat: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub ground_rate_wo_vat: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub insr_rate: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub insr_rate_with_vat: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub insr_rate_wo_vat: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub completeness_checking_rate_with_vat: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub completeness_checking_rate_wo_vat: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub fragile_rate_with_vat: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub fragile_rate_wo_vat: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub inventory_rate_with_vat: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub inventory_rate_wo_vat: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub notice_rate_with_vat: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub notice_rate_wo_vat: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub oversize_rate_with_vat: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub oversize_rate_wo_vat: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub sms_notice_recipient_rate_with_vat: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub sms_notice_recipient_rate_wo_vat: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub total_rate_wo_vat: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub total_vat: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Dimension {
    #[serde(deserialize_with = "null_as_default")]
    pub height: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub length: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub width: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct DeliveryTime {
    #[serde(deserialize_with = "null_as_default")]
    pub max_days: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub min_days: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Goods {
    #[serde(deserialize_with = "null_as_default")]
    pub items: Vec<GoodsItem>,
}

/// One line of the goods inventory attached to an order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct GoodsItem {
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(deserialize_with = "null_as_default")]
    pub quantity: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub value: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub insr_value: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub vat_rate: i64,
}

/// Customs paperwork for international shipments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct CustomsDeclaration {
    #[serde(deserialize_with = "null_as_default")]
    pub currency: String,
    #[serde(deserialize_with = "null_as_default")]
    pub customs_entries: Vec<CustomsEntry>,
    #[serde(deserialize_with = "null_as_default")]
    pub entries_type: String,
    #[serde(deserialize_with = "null_as_default")]
    pub with_certificate: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub with_invoice: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub with_license: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct CustomsEntry {
    #[serde(deserialize_with = "null_as_default")]
    pub amount: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub country_code: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(deserialize_with = "null_as_default")]
    pub tnved_code: String,
    #[serde(deserialize_with = "null_as_default")]
    pub value: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub weight: i64,
}

/// Result of a backlog search.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSearchResponse {
    pub orders: Vec<Order>,
}
