use super::{Config, ConfigError};

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.input.as_os_str().is_empty() {
            return Err(ConfigError::InvalidConfig(
                "Input file path must not be empty".to_string(),
            ));
        }

        if let Some(output) = &self.output
            && Some(output) == self.ranked_output.as_ref()
        {
            return Err(ConfigError::InvalidConfig(format!(
                "Output and ranked output must be different files: {}",
                output.display()
            )));
        }

        self.consolidation()
            .validate()
            .map_err(|e| ConfigError::InvalidConfig(e.to_string()))
    }
}
