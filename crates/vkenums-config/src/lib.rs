use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct VkEnumsConfig {
    pub namespace: Option<String>,
    pub include: Option<Vec<String>>,
    pub exclude: Option<Vec<String>>,
    pub names: Option<NamesCfg>,
    pub values: Option<ValuesCfg>,
    pub output: Option<OutputCfg>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NamesCfg {
    pub prefix_replacement: Option<String>,
    pub remove_postfix: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ValuesCfg {
    pub prefix_replacement: Option<String>,
    pub number_prefix: Option<String>,
    pub remove_structure_names: Option<bool>,
    pub remove_underscores: Option<bool>,
    pub tolower: Option<bool>,
    pub capitalize_start: Option<bool>,
    pub remove_postfix: Option<bool>,
    pub remove_postfix_core_types: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputCfg {
    pub out: Option<String>,
    /// "cpp" or "json".
    pub format: Option<String>,
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("{0}")]
    Other(String),
}

pub fn load_config() -> Result<VkEnumsConfig, ConfigError> {
    // Search order: CWD/vkenums.toml, $HOME/.config/vkenums/vkenums.toml
    let mut merged = VkEnumsConfig::default();
    if let Ok(p) = std::env::current_dir() {
        let path = p.join("vkenums.toml");
        if let Ok(s) = std::fs::read_to_string(&path) {
            if let Ok(cfg) = toml::from_str::<VkEnumsConfig>(&s) {
                merged = merge(merged, cfg);
            }
        }
    }
    if let Some(base) = dirs::config_dir() {
        let path = base.join("vkenums").join("vkenums.toml");
        if let Ok(s) = std::fs::read_to_string(&path) {
            if let Ok(cfg) = toml::from_str::<VkEnumsConfig>(&s) {
                merged = merge(merged, cfg);
            }
        }
    }
    Ok(merged)
}

fn merge(mut a: VkEnumsConfig, b: VkEnumsConfig) -> VkEnumsConfig {
    if a.namespace.is_none() {
        a.namespace = b.namespace;
    }
    if a.include.is_none() {
        a.include = b.include;
    }
    if a.exclude.is_none() {
        a.exclude = b.exclude;
    }
    a.names = merge_opt(a.names, b.names, merge_names);
    a.values = merge_opt(a.values, b.values, merge_values);
    a.output = merge_opt(a.output, b.output, merge_output);
    a
}

fn merge_opt<T: Default>(a: Option<T>, b: Option<T>, f: fn(T, T) -> T) -> Option<T> {
    match (a, b) {
        (Some(a), Some(b)) => Some(f(a, b)),
        (None, Some(b)) => Some(b),
        (Some(a), None) => Some(a),
        (None, None) => None,
    }
}

fn merge_names(mut a: NamesCfg, b: NamesCfg) -> NamesCfg {
    if a.prefix_replacement.is_none() {
        a.prefix_replacement = b.prefix_replacement;
    }
    if a.remove_postfix.is_none() {
        a.remove_postfix = b.remove_postfix;
    }
    a
}

fn merge_values(mut a: ValuesCfg, b: ValuesCfg) -> ValuesCfg {
    if a.prefix_replacement.is_none() {
        a.prefix_replacement = b.prefix_replacement;
    }
    if a.number_prefix.is_none() {
        a.number_prefix = b.number_prefix;
    }
    if a.remove_structure_names.is_none() {
        a.remove_structure_names = b.remove_structure_names;
    }
    if a.remove_underscores.is_none() {
        a.remove_underscores = b.remove_underscores;
    }
    if a.tolower.is_none() {
        a.tolower = b.tolower;
    }
    if a.capitalize_start.is_none() {
        a.capitalize_start = b.capitalize_start;
    }
    if a.remove_postfix.is_none() {
        a.remove_postfix = b.remove_postfix;
    }
    if a.remove_postfix_core_types.is_none() {
        a.remove_postfix_core_types = b.remove_postfix_core_types;
    }
    a
}

fn merge_output(mut a: OutputCfg, b: OutputCfg) -> OutputCfg {
    if a.out.is_none() {
        a.out = b.out;
    }
    if a.format.is_none() {
        a.format = b.format;
    }
    a
}
