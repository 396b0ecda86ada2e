//! MRTD security-object witness derivation library
//!
//! This library turns a machine-readable-travel-document security object
//! (a signed, tree-structured binary document) into the fixed-shape witness
//! record consumed by a downstream arithmetic verification circuit.
//!
//! ## Main Components
//!
//! - [`locator`]: structural searches over the decoded document tree
//! - [`extract`]: typed recovery of keys, signatures and signed containers
//! - [`classify`]: signature-scheme classification table
//! - [`offset`]: byte-offset discovery via digest-substring search
//! - [`limbs`]: 120-bit limb encoding and Barrett reduction constants
//! - [`commitment`]: Poseidon identity commitments
//! - [`witness`]: the assembled pipeline
//! - [`artifacts`]: circuit source / witness-value file generation
//! - [`config`]: centralized protocol constants
//!
//! ## Error Handling
//!
//! All fallible operations return `Result<T, WitnessError>`. Fatal
//! conditions (malformed encoding, missing structure, unsupported digest
//! length, failed offset search) abort the document's derivation with
//! component context. An unknown signature scheme is the one non-fatal
//! condition: derivation continues with identifier 0 and a warning.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use mrtd_witness::{artifacts, witness, InputDocument, WitnessError};
//!
//! let doc = InputDocument::from_path(std::path::Path::new("document.json"))?;
//! let record = witness::derive_witness(&doc)?;
//!
//! let circuit = artifacts::circuit_source(&record);
//! let values = artifacts::witness_values(&record);
//! # Ok::<(), WitnessError>(())
//! ```

pub mod artifacts;
pub mod classify;
pub mod commitment;
pub mod config;
pub mod digest;
pub mod error;
pub mod extract;
pub mod input;
pub mod limbs;
pub mod locator;
pub mod offset;
pub mod tree;
pub mod types;
pub mod witness;

// Re-export commonly used types and functions for convenience
pub use commitment::{build_identity_commitment, FieldElement, IdentityCommitment};
pub use error::{Result, WitnessError};
pub use input::InputDocument;
pub use limbs::ChunkedParams;
pub use tree::TreeNode;
pub use types::{PublicKey, SigAlgorithm, Signature};
pub use witness::{derive_witness, WitnessRecord};
