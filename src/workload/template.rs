use std::collections::BTreeMap;

use rand::Rng;

use crate::domain::{BookPayload, Iteration};
use crate::error::ConfigError;

use super::pool::ParameterPool;

/// Read-only request recipe shared by every virtual user of a run.
#[derive(Debug, Clone)]
pub struct RequestTemplate {
    name_template: String,
    pool: ParameterPool,
}

impl RequestTemplate {
    /// # Errors
    ///
    /// Returns `EmptyNameTemplate` when the template is blank.
    pub fn new(name_template: impl Into<String>, pool: ParameterPool) -> Result<Self, ConfigError> {
        let name_template = name_template.into();
        if name_template.trim().is_empty() {
            return Err(ConfigError::EmptyNameTemplate);
        }
        Ok(Self {
            name_template,
            pool,
        })
    }

    #[must_use]
    pub const fn pool(&self) -> &ParameterPool {
        &self.pool
    }

    /// Renders the book name for an iteration. Pure: the same iteration
    /// always yields the same name.
    #[must_use]
    pub fn render_name(&self, iteration: Iteration) -> String {
        let mut vars = BTreeMap::new();
        vars.insert("vu", iteration.virtual_user_id.to_string());
        vars.insert("iter", iteration.iteration_index.to_string());
        render_template(&self.name_template, &vars)
    }

    /// Builds the payload for one iteration, drawing exactly one author from
    /// the pool.
    pub fn build<R>(&self, iteration: Iteration, rng: &mut R) -> BookPayload
    where
        R: Rng + ?Sized,
    {
        BookPayload {
            name: self.render_name(iteration),
            author_id: vec![self.pool.sample(rng).to_owned()],
        }
    }
}

/// Substitutes `{{key}}` placeholders. Unknown keys are left in place so a
/// typo shows up in the request instead of silently disappearing.
pub(crate) fn render_template(input: &str, vars: &BTreeMap<&str, String>) -> String {
    let mut rest = input;
    let mut output = String::with_capacity(input.len());

    loop {
        let Some(start) = rest.find("{{") else {
            output.push_str(rest);
            break;
        };
        let (before, after_start) = rest.split_at(start);
        output.push_str(before);
        let Some(after) = after_start.strip_prefix("{{") else {
            output.push_str(after_start);
            break;
        };
        let Some(end) = after.find("}}") else {
            output.push_str("{{");
            output.push_str(after);
            break;
        };
        let (key_part, after_end) = after.split_at(end);
        let key = key_part.trim();
        if let Some(value) = vars.get(key) {
            output.push_str(value);
        } else {
            output.push_str("{{");
            output.push_str(key);
            output.push_str("}}");
        }
        rest = match after_end.strip_prefix("}}") {
            Some(remaining) => remaining,
            None => {
                output.push_str(after_end);
                break;
            }
        };
    }

    output
}
