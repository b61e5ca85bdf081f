use std::env;
use std::path::Path;

fn main() {
    println!("rerun-if-changed=build.rs");
    string_cache_codegen::AtomType::new("atom::Atom", "atom!")
        .atoms(&["input", "output", "VSS", "VDD"])
        .write_to_file(&Path::new(&env::var("OUT_DIR").unwrap()).join("bdnet_atom.rs"))
        .unwrap()
}
