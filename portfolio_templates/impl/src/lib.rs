use std::sync::Arc;

use portfolio_di::Build;
use portfolio_templates_contracts::{
    Template, TemplateService, BASE_TEMPLATE, BASE_TEMPLATE_NAME, TEMPLATES,
};
use tera::Tera;

#[derive(Debug, Clone, Build)]
pub struct TemplateServiceImpl {
    #[state]
    state: State,
}

#[derive(Debug, Clone)]
struct State(Arc<Tera>);

impl Default for State {
    fn default() -> Self {
        // Names end in `.html`, so Tera's default autoescaping applies.
        let mut tera = Tera::default();

        tera.add_raw_template(BASE_TEMPLATE_NAME, BASE_TEMPLATE).unwrap();

        for &(name, template) in TEMPLATES {
            tera.add_raw_template(name, template).unwrap();
        }

        Self(tera.into())
    }
}

impl TemplateService for TemplateServiceImpl {
    fn render<T: Template>(&self, template: &T) -> anyhow::Result<String> {
        let context = tera::Context::from_serialize(template)?;
        self.state.0.render(T::NAME, &context).map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use portfolio_demo::YAMADA_SUBMISSION;
    use portfolio_models::{contact::ContactSubmission, language::Language};
    use portfolio_templates_contracts::ContactAcknowledgementTemplate;
    use pretty_assertions::assert_eq;

    use super::*;

    fn sut() -> TemplateServiceImpl {
        TemplateServiceImpl {
            state: Default::default(),
        }
    }

    #[test]
    fn contact_acknowledgement() {
        // Arrange
        let template = ContactAcknowledgementTemplate::from(&*YAMADA_SUBMISSION);

        // Act
        let result = sut().render(&template).unwrap();

        // Assert
        assert!(result.starts_with("<!DOCTYPE html>"));
        assert!(result.contains(r#"<html lang="ja">"#));
        assert!(result.contains("お問い合わせありがとうございます"));
        assert!(result.contains("<strong>お名前: </strong>山田 太郎"));
        assert!(result.contains("<strong>メールアドレス: </strong>yamada@example.com"));
        assert!(result.contains("<strong>件名: </strong>ポートフォリオについて"));
        assert!(result.contains(r#"<p style="white-space: pre-wrap">Hello
World</p>"#));
        assert!(result.contains("本メールに心当たりがない場合は"));
    }

    #[test]
    fn rendering_is_deterministic() {
        let template = ContactAcknowledgementTemplate::from(&*YAMADA_SUBMISSION);
        let sut = sut();

        let first = sut.render(&template).unwrap();
        let second = sut.render(&template).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn user_input_is_escaped() {
        // Arrange
        let template = ContactAcknowledgementTemplate {
            last_name: "<script>alert(1)</script>".into(),
            message: "a & b <b>bold</b>".into(),
            ..ContactAcknowledgementTemplate::from(&*YAMADA_SUBMISSION)
        };

        // Act
        let result = sut().render(&template).unwrap();

        // Assert
        assert!(!result.contains("<script>"));
        assert!(result.contains("&lt;script&gt;"));
        assert!(result.contains("a &amp; b &lt;b&gt;bold&lt;&#x2F;b&gt;"));
    }

    #[test]
    fn english_labels() {
        let submission = ContactSubmission {
            language: Language::En,
            ..YAMADA_SUBMISSION.clone()
        };
        let template = ContactAcknowledgementTemplate::from(&submission);

        let result = sut().render(&template).unwrap();

        assert!(result.contains(r#"<html lang="en">"#));
        assert!(result.contains("<strong>Name: </strong>山田 太郎"));
        assert!(result.contains("<strong>Subject: </strong>"));
        assert!(!result.contains("お名前"));
    }

    #[test]
    fn subject_line_is_omitted_without_subject() {
        let submission = ContactSubmission {
            subject: None,
            ..YAMADA_SUBMISSION.clone()
        };
        let template = ContactAcknowledgementTemplate::from(&submission);

        let result = sut().render(&template).unwrap();

        assert!(!result.contains("件名"));
        assert!(result.contains("<strong>お問い合わせ内容:</strong>"));
    }
}
