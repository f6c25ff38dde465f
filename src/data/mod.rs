use crate::messages::Messages;
use chrono::NaiveDate;
use currency::CurrencyValue;
use eframe::egui::WidgetText;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub(crate) mod currency;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub(crate) enum DocumentType {
    Invoice,
    Quotation,
}

impl DocumentType {
    pub(crate) fn name(&self) -> &'static str {
        match self {
            DocumentType::Invoice => Messages::Invoice.msg(),
            DocumentType::Quotation => Messages::Quotation.msg(),
        }
    }

    /// Language independent, used for file names.
    pub(crate) fn file_stem(&self) -> &'static str {
        match self {
            DocumentType::Invoice => "Invoice",
            DocumentType::Quotation => "Quotation",
        }
    }

    pub(crate) fn has_payment_boxes(&self) -> bool {
        matches!(self, DocumentType::Invoice)
    }
}

impl From<DocumentType> for WidgetText {
    fn from(val: DocumentType) -> Self {
        WidgetText::from(val.name())
    }
}

/// A normalized line item, all numeric fields already coerced.
#[derive(Debug, Clone, Eq, PartialEq)]
pub(crate) struct LineItem {
    pub(crate) title: String,
    pub(crate) description: String,
    pub(crate) feet: Decimal,
    pub(crate) quantity: u64,
    pub(crate) rate: Decimal,
    pub(crate) manual_total: Decimal,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub(crate) struct ComputedLineItem {
    pub(crate) item: LineItem,
    pub(crate) total: CurrencyValue,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub(crate) struct Customer {
    pub(crate) name: String,
    pub(crate) mobile: String,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub(crate) struct Document {
    pub(crate) document_type: DocumentType,
    pub(crate) customer: Customer,
    pub(crate) date: NaiveDate,
    pub(crate) items: Vec<ComputedLineItem>,
    pub(crate) note: String,
    pub(crate) grand_total: CurrencyValue,
    pub(crate) adjustment: Option<Adjustment>,
    pub(crate) payment: Option<Payment>,
}

/// Discount and tax on top of the item sum, absent if neither is given.
#[derive(Debug, Clone, Eq, PartialEq)]
pub(crate) struct Adjustment {
    pub(crate) discount: CurrencyValue,
    /// in percent of the discounted sum
    pub(crate) tax_rate: Decimal,
    pub(crate) tax: CurrencyValue,
    pub(crate) net_total: CurrencyValue,
}

/// Only present on invoices.
#[derive(Debug, Clone, Eq, PartialEq)]
pub(crate) struct Payment {
    pub(crate) advance: CurrencyValue,
    pub(crate) due: CurrencyValue,
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub(crate) struct CustomerEntry {
    pub(crate) id: Uuid,
    pub(crate) name: String,
    pub(crate) mobile: String,
    pub(crate) address: String,
}

impl CustomerEntry {
    pub(crate) fn new(name: String, mobile: String, address: String) -> Self {
        Self {
            id: Uuid::now_v7(),
            name,
            mobile,
            address,
        }
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub(crate) struct ProductEntry {
    pub(crate) id: Uuid,
    pub(crate) name: String,
    pub(crate) description: String,
    pub(crate) unit: String,
    pub(crate) rate: Decimal,
}

impl ProductEntry {
    pub(crate) fn new(name: String, description: String, unit: String, rate: Decimal) -> Self {
        Self {
            id: Uuid::now_v7(),
            name,
            description,
            unit,
            rate,
        }
    }
}
