//! STELS asset-transfer transactions.
//!
//! The pipeline, in order:
//! 1. **validate** recipient, amount, fee and the genesis signing domain
//! 2. **build** the unsigned transaction base
//! 3. **canonicalize** the base to sorted-key compact JSON
//! 4. **hash** the canonical text with SHA-256
//! 5. **sign** the hash under the domain through a [`TransactionSigner`]
//! 6. **assemble** base + `signatures` into an immutable [`AssetTransaction`]
//!
//! [`verify_transaction`] runs steps 3 to 5 in reverse for a received transaction.

pub mod asset;
pub mod builder;
pub mod canonical;
pub mod error;
pub mod signer;
pub mod validation;
pub mod verify;

pub use asset::{AssetTransaction, AssetTransactionBase, SignatureRecord, ASSET_TRANSFER};
pub use builder::{
    build_base, create_signed_transaction, create_signed_transaction_at, SignedTransfer,
    TransferRequest,
};
pub use canonical::{canonicalize, canonicalize_value};
pub use error::TransactionError;
pub use signer::TransactionSigner;
pub use validation::{resolve_sign_domain, validate_transfer, ValidatedTransfer};
pub use verify::{verify_transaction, verify_with_genesis};
