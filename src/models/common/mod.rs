pub mod date_range;
pub mod error_code;
pub mod pagination;
pub mod response;

pub use date_range::{DateRangeParams, RecordListQuery};
pub use error_code::ErrorCode;
pub use pagination::{PaginatedResponse, PaginationInfo, PaginationQuery};
pub use response::{ApiResponse, INVALID_DATA_MESSAGE, LegacyResponse};
