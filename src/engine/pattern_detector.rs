// ==========================================
// Cutting list analyzer - pattern detector
// ==========================================
// Responsibilities: header row detection, product-section
// discovery, data-row classification, work-order ID and
// profile-type recognition
// Input: row-major grid of CellValue
// Output: HeaderPattern / ProductSection hints
// ==========================================
// Heuristics favour recall: a doubtful row is kept and
// flagged downstream rather than dropped here.
// ==========================================

mod core;
mod header;
mod product_name;
mod profile_type;
mod section;
mod work_order_id;


pub use self::core::PatternDetector;
pub use product_name::ProductNameCandidate;
