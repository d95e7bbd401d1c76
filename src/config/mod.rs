mod loader;
mod model;

pub use loader::{
    ConfigLoader, FileConfigLoader, FileSystem, LOCAL_CONFIG_NAME, LoadResult, RealFileSystem,
};
pub use model::{
    Config, DEFAULT_MAX_FILE_SIZE, DEFAULT_MAX_FILES, DEFAULT_MAX_PROBLEMS, GLOBAL_FUNCTION_KEY,
    ScanConfig, WhitelistConfig,
};

/// Starter configuration written by `doc-doctor init`.
pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# doc-doctor configuration

[whitelist]
# Check `main` like any other function.
check_main_function = false

# Workspace-relative path prefixes that are never checked.
files = []

# Functions whose return type matches an entry are not checked, e.g. ["void"].
return_types = []

# Exempt functions per file, by name or exact signature. "*" applies to all files.
[whitelist.functions]
# "src/legacy.c" = ["old_helper", "int parse(const char *s)"]
# "*" = ["debug_dump"]

[scan]
extensions = ["c", "cpp"]
exclude = ["**/node_modules/**"]
max_files = 1000
max_file_size = 1048576
max_problems = 1000
skip_control_statements = false
"#;
