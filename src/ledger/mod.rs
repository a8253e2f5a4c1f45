// Ledger module - THE TANGLE
// The pending pool of unconfirmed transactions and the DAG of everything admitted

mod dag;
mod pending;

pub use dag::{Dag, DagError, DagSnapshot};
pub use pending::{PendingPool, TIPS_PER_TRANSACTION};
