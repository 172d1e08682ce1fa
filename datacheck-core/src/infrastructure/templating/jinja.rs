// datacheck-core/src/infrastructure/templating/jinja.rs

// Turns report view models into HTML pages. Templates are compiled into the
// binary; the `.html` suffix of every template name switches on minijinja's
// HTML auto-escaping for all interpolated values.

use minijinja::Environment;

use crate::application::ports::TemplateEngine;
use crate::error::DataCheckError;
use crate::infrastructure::error::InfrastructureError;

pub const REPORT_TEMPLATE: &str = "report.html";
pub const NOT_FOUND_TEMPLATE: &str = "not_found.html";
pub const ERROR_TEMPLATE: &str = "error.html";

const TEMPLATES: [(&str, &str); 3] = [
    (REPORT_TEMPLATE, include_str!("templates/report.html")),
    (NOT_FOUND_TEMPLATE, include_str!("templates/not_found.html")),
    (ERROR_TEMPLATE, include_str!("templates/error.html")),
];

pub struct JinjaRenderer {
    env: Environment<'static>,
}

impl JinjaRenderer {
    pub fn new() -> Result<Self, InfrastructureError> {
        let mut env = Environment::new();

        for (name, source) in TEMPLATES {
            env.add_template(name, source)?;
        }

        // 12345 -> "12,345"
        env.add_filter("thousands", |value: i64| -> String { thousands(value) });

        Ok(Self { env })
    }
}

pub fn thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if value < 0 {
        out.insert(0, '-');
    }
    out
}

impl TemplateEngine for JinjaRenderer {
    fn render(
        &self,
        template_name: &str,
        context: &serde_json::Value,
    ) -> Result<String, DataCheckError> {
        let tmpl = self
            .env
            .get_template(template_name)
            .map_err(InfrastructureError::TemplateError)?;
        let html = tmpl
            .render(context)
            .map_err(InfrastructureError::TemplateError)?;
        Ok(html)
    }
}
