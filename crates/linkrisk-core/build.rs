use std::env;
use std::fs;
use std::path::Path;

fn main() {
    let out_dir = env::var("OUT_DIR").unwrap();
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").unwrap();
    // Data files live under the crate directory so they ship in the crate tarball.
    let data_dir = Path::new(&manifest_dir).join("assets").join("data");

    compile_domain_list(&data_dir, &out_dir, "brands.txt", "BRANDS", "brands_gen.rs");
    compile_domain_list(
        &data_dir,
        &out_dir,
        "shorteners.txt",
        "SHORTENERS",
        "shorteners_gen.rs",
    );

    println!("cargo:rerun-if-changed=assets/data/brands.txt");
    println!("cargo:rerun-if-changed=assets/data/shorteners.txt");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Compile a one-domain-per-line list into a `&[&str]` constant.
///
/// Blank lines and `#` comments are skipped, entries are lowercased and
/// duplicates dropped while keeping first-seen order.
fn compile_domain_list(data_dir: &Path, out_dir: &str, file: &str, name: &str, out: &str) {
    let path = data_dir.join(file);
    let content =
        fs::read_to_string(&path).unwrap_or_else(|e| panic!("Failed to read {file}: {e}"));

    let mut domains: Vec<String> = Vec::new();
    for line in content.lines() {
        let line = line.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }
        let domain = line.to_lowercase();
        if domain.contains(char::is_whitespace) || domain.contains('"') {
            panic!("COMPILE ERROR: invalid entry '{domain}' in {file}");
        }
        if !domains.contains(&domain) {
            domains.push(domain);
        }
    }

    let mut code = String::new();
    code.push_str(&format!("/// Auto-generated from assets/data/{file}.\n"));
    code.push_str(&format!("pub const {name}: &[&str] = &[\n"));
    for domain in &domains {
        code.push_str(&format!("    \"{domain}\",\n"));
    }
    code.push_str("];\n");
    let count = domains.len();
    code.push_str(&format!("\npub const {name}_COUNT: usize = {count};\n"));

    let out_path = Path::new(out_dir).join(out);
    fs::write(&out_path, code).unwrap();
}
