fn main() {
    #[cfg(feature = "gui")]
    {
        let config = slint_build::CompilerConfiguration::new()
            .with_include_paths(vec!["ui".into()]);
        slint_build::compile_with_config("ui/app.slint", config)
            .expect("failed to compile ui/app.slint");
    }
}
