use std::env;
use std::path::PathBuf;

fn main() {
    let crate_dir = env::var("CARGO_MANIFEST_DIR").expect("cargo sets CARGO_MANIFEST_DIR");
    let out_path = PathBuf::from(&crate_dir).join("spirit.h");

    println!("cargo:rerun-if-changed=src/lib.rs");

    match cbindgen::Builder::new()
        .with_crate(crate_dir)
        .with_language(cbindgen::Language::C)
        .with_include_guard("SPIRIT_H")
        .with_cpp_compat(true)
        .with_documentation(true)
        .generate()
    {
        Ok(bindings) => {
            bindings.write_to_file(out_path);
        }
        Err(e) => println!("cargo:warning=could not generate spirit.h: {}", e),
    }
}
