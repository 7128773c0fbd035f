/// Bedroom category label carried by each sale record.
/// Examples: `small`, `medium`, `large`, `studio`
pub type BedroomCategory = String;
/// Calendar year of a sale.
/// Example: `2015`
pub type Year = i32;
/// Calendar month of a sale (1-12).
/// Example: `7`
pub type Month = u32;
/// Seed that fully determines a sampling pass.
/// Example: `42`
pub type Seed = u64;
/// Name of a tabular source column.
/// Examples: `price`, `sqft_living`, `price_per_sqft`
pub type ColumnName = String;
/// Name of a filter field as spelled at the request boundary.
/// Examples: `min_price`, `bedroom_category`, `end_month`
pub type FilterKey = String;
