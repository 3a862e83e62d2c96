//! UniFFI bindgen CLI tool for generating language bindings.
//!
//! Generates the Swift and Kotlin sidebar bindings from the synapse-tree
//! library.
//!
//! ## Usage
//!
//! Generate Swift bindings:
//! ```bash
//! cargo run --features cli --bin uniffi-bindgen generate --library target/release/libsynapse_tree.so --language swift --out-dir ./bindings
//! ```
//!
//! Generate Kotlin bindings:
//! ```bash
//! cargo run --features cli --bin uniffi-bindgen generate --library target/release/libsynapse_tree.so --language kotlin --out-dir ./bindings
//! ```

fn main() {
    uniffi::uniffi_bindgen_main()
}
