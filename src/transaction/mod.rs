// Transaction module - THE UNIT OF VALUE
// Transaction model, fee and proof-of-work rules, validation and client-side building

mod builder;
mod fee;
mod model;
mod validator;
mod work;

pub use builder::{BuildError, TransactionBuilder, DEFAULT_POW_MAX_ITERATIONS};
pub use fee::{calculate_fee, is_valid_fee};
pub use model::{
    is_valid_address, is_valid_id, Transaction, TransactionKind, TransactionStatus, ADDRESS_LENGTH,
};
pub use validator::{TransactionValidator, ValidationError};
pub use work::{solve_proof_of_work, target_prefix_length, verify_proof_of_work};
