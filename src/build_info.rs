/// JSON build report, git values come from `build.rs`.
pub fn report(name: &str) -> String {
    format!(
        concat!(
            "{{\n",
            "  \"name\": \"{}\",\n",
            "  \"version\": \"{}\",\n",
            "  \"git_describe\": \"{}\",\n",
            "  \"git_hash\": \"{}\"\n",
            "}}"
        ),
        name,
        env!("CARGO_PKG_VERSION"),
        env!("GIT_DESCRIBE"),
        env!("GIT_HASH")
    )
}

pub fn print_report(name: &str) {
    println!("{}", report(name));
}
