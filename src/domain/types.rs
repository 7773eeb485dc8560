// ==========================================
// Cutting list analyzer - domain type definitions
// ==========================================
// Error codes, severities and the logical column fields
// shared by every layer of the extraction pipeline.
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// Error code
// ==========================================
// Serialized as SCREAMING_SNAKE_CASE (the codes the frontend switches on)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    MissingWorkOrder,
    MissingProfile,
    MissingMeasurement,
    InvalidQuantity,
    QuantityOverflow,
    HighQuantity,
    InheritedId,
    GeneratedId,
    InvalidFormat,
    ParseFailed,
    FileNotFound,
    EmptyWorksheet,
    NoHeaderFound,
    NoProductsFound,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            ErrorCode::MissingWorkOrder => "MISSING_WORK_ORDER",
            ErrorCode::MissingProfile => "MISSING_PROFILE",
            ErrorCode::MissingMeasurement => "MISSING_MEASUREMENT",
            ErrorCode::InvalidQuantity => "INVALID_QUANTITY",
            ErrorCode::QuantityOverflow => "QUANTITY_OVERFLOW",
            ErrorCode::HighQuantity => "HIGH_QUANTITY",
            ErrorCode::InheritedId => "INHERITED_ID",
            ErrorCode::GeneratedId => "GENERATED_ID",
            ErrorCode::InvalidFormat => "INVALID_FORMAT",
            ErrorCode::ParseFailed => "PARSE_FAILED",
            ErrorCode::FileNotFound => "FILE_NOT_FOUND",
            ErrorCode::EmptyWorksheet => "EMPTY_WORKSHEET",
            ErrorCode::NoHeaderFound => "NO_HEADER_FOUND",
            ErrorCode::NoProductsFound => "NO_PRODUCTS_FOUND",
        };
        write!(f, "{}", code)
    }
}

// ==========================================
// Severity
// ==========================================
// Order: Info < Warning < Error < Critical
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
    Critical,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
            Severity::Critical => write!(f, "critical"),
        }
    }
}

// ==========================================
// Logical sheet field
// ==========================================
// Conventional layout: metadata in columns 0-6,
// profile / measurement / quantity in columns 7-9
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SheetField {
    WorkOrderId,
    Date,
    Version,
    Color,
    Note,
    SipQuantity,
    Size,
    Profile,
    Measurement,
    Quantity,
}

impl SheetField {
    pub const ALL: [SheetField; 10] = [
        SheetField::WorkOrderId,
        SheetField::Date,
        SheetField::Version,
        SheetField::Color,
        SheetField::Note,
        SheetField::SipQuantity,
        SheetField::Size,
        SheetField::Profile,
        SheetField::Measurement,
        SheetField::Quantity,
    ];

    /// Column index used when no header mapping is available
    pub fn conventional_column(self) -> usize {
        match self {
            SheetField::WorkOrderId => 0,
            SheetField::Date => 1,
            SheetField::Version => 2,
            SheetField::Color => 3,
            SheetField::Note => 4,
            SheetField::SipQuantity => 5,
            SheetField::Size => 6,
            SheetField::Profile => 7,
            SheetField::Measurement => 8,
            SheetField::Quantity => 9,
        }
    }

    /// Fields a header row must mostly contain to be accepted
    pub fn is_required(self) -> bool {
        matches!(
            self,
            SheetField::Profile | SheetField::Measurement | SheetField::Quantity
        )
    }
}

impl fmt::Display for SheetField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SheetField::WorkOrderId => "workOrderId",
            SheetField::Date => "date",
            SheetField::Version => "version",
            SheetField::Color => "color",
            SheetField::Note => "note",
            SheetField::SipQuantity => "sipQuantity",
            SheetField::Size => "size",
            SheetField::Profile => "profile",
            SheetField::Measurement => "measurement",
            SheetField::Quantity => "quantity",
        };
        write!(f, "{}", name)
    }
}

// ==========================================
// Work order source type
// ==========================================
// Direct: ID read from the work order's own row
// Merged: several IDs on one row joined with '+'
// Inherited: no ID on the first row; the ID was synthesized or taken from context
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkOrderSourceType {
    Direct,
    Inherited,
    Merged,
}

impl fmt::Display for WorkOrderSourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkOrderSourceType::Direct => write!(f, "direct"),
            WorkOrderSourceType::Inherited => write!(f, "inherited"),
            WorkOrderSourceType::Merged => write!(f, "merged"),
        }
    }
}
