//! Structural connectivity: inferring covalent bonds for structures whose
//! source files carry coordinates only.

pub mod connectivity;
