use crate::error::Result;
use renderflow::ProviderRegistry;

/// Registered provider names, one per line
pub fn list_providers(registry: &ProviderRegistry) -> String {
    registry.names().join("\n")
}

pub fn describe(registry: &ProviderRegistry, provider: &str) -> Result<String> {
    Ok(registry.load(provider)?.describe())
}

pub fn execute_list() -> Result<()> {
    let listing = list_providers(&ProviderRegistry::builtin());
    if !listing.is_empty() {
        println!("{listing}");
    }
    Ok(())
}

pub fn execute_describe(provider: &str) -> Result<()> {
    println!("{}", describe(&ProviderRegistry::builtin(), provider)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_builtin() {
        assert_eq!(list_providers(&ProviderRegistry::builtin()), "minimal");
        assert_eq!(list_providers(&ProviderRegistry::new()), "");
    }

    #[test]
    fn test_describe_minimal() {
        let output = describe(&ProviderRegistry::builtin(), "minimal").unwrap();
        assert!(output.starts_with("Minimal Provider"));
        assert!(output.contains("- greeting: Greeting"));
        assert!(output.contains("- series: Series"));
        assert!(output.contains("name: text | default='World'"));
    }

    #[test]
    fn test_describe_unknown() {
        let err = describe(&ProviderRegistry::new(), "ghost").unwrap_err();
        assert_eq!(
            err.user_message(),
            "Provider 'ghost' not found. Available providers: (none)"
        );
    }
}
