//! Domain models.
//!
//! Models serialize to the camelCase JSON the API returns. Most also derive
//! `sqlx::FromRow` so repositories can map rows straight into them.

pub mod adjustment;
pub mod expense;
pub mod product;
pub mod session;
pub mod shift;
pub mod sale;
pub mod user;

pub use adjustment::{Adjustment, AdjustmentFilter, AdjustmentWithUser, NewAdjustment};
pub use expense::{Expense, ExpenseWithUser, NewExpense};
pub use product::{NewProduct, Product, ProductPatch};
pub use sale::{NewSale, Sale, SaleWithUser};
pub use session::keys as session_keys;
pub use shift::Shift;
pub use user::{NewUser, User, UserSummary};
