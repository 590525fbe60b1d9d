//! Prompt templates for Destek.
//!
//! The answer template carries the entire behavioral policy: answer strictly
//! from the knowledge slot, refuse with a fixed sentence when the answer is
//! not there, and react warmly to courtesy phrases without touching the
//! knowledge base. The code never enforces any of this; the model does.
//!
//! Prompts can be customized by placing TOML files in the custom prompts
//! directory.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// The refusal sentence the model is instructed to emit verbatim when the
/// knowledge base does not cover the question.
pub const REFUSAL_SENTENCE: &str =
    "Bu konuda güncel bir bilgim bulunmuyor, dilerseniz sizi satış veya destek ekibimize yönlendirebilirim.";

/// Collection of all prompt templates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Prompts {
    pub answer: AnswerPrompts,
    /// Custom variables from config, available in all prompts.
    #[serde(skip)]
    pub variables: std::collections::HashMap<String, String>,
}


/// Prompts for answer generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnswerPrompts {
    /// Main template. Slots: {{history_section}}, {{knowledge}}, {{question}}.
    pub template: String,
    /// Rendered into {{history_section}} when prior turns exist. Slot: {{history}}.
    pub history_section: String,
}

impl Default for AnswerPrompts {
    fn default() -> Self {
        Self {
            template: r#"Sen BulutSantral A.Ş. için çalışan, nazik ve yardımsever bir yapay zeka asistanısın. Görevin, kullanıcının yazdığı metnin türüne göre iki farklı şekilde cevap vermektir:

1.  **EĞER KULLANICI BİR SORU SORARSA:** Cevabı SADECE ve SADECE aşağıda verilen 'Bilgi Kaynağı' metnini kullanarak bul ve cevapla. Eğer soruya cevap metinde yoksa, 'Bu konuda güncel bir bilgim bulunmuyor, dilerseniz sizi satış veya destek ekibimize yönlendirebilirim.' de. Asla bilgi uydurma.

2.  **EĞER KULLANICI BİR SORU SORMAZSA:** Kullanıcının yazdığı metin bir soru değil de, 'tamamdır', 'teşekkür ederim', 'çok iyi', 'harika', 'anladım' gibi bir onay, teşekkür veya olumlu bir geri bildirim ise, Bilgi Bankası'nı KESİNLİKLE KULLANMA. Bu durumda, kullanıcıya sıcak ve doğal bir tepki ver. Örneğin: 'Yardımcı olabildiğime sevindim!', 'Rica ederim, başka bir sorunuz var mıydı?', 'Harika! Size başka nasıl yardımcı olabilirim?' veya 'Ne demek, memnuniyetle!' gibi kısa ve nazik bir cevap ver.

{{history_section}}---
Bilgi Kaynağı:
{{knowledge}}
---

Kullanıcının Sorusu: {{question}}

Cevap:
"#
            .to_string(),

            history_section: r#"3.  **KONUŞMA GEÇMİŞİ:** Aşağıda kullanıcı ile aranızda geçen önceki konuşma yer alıyor. Kullanıcının yeni sorusu önceki mesajlara gönderme yapabilir ('peki fiyatı ne kadar?' gibi); böyle bir durumda soruyu geçmişteki bağlama göre yorumla ve cevabını yine SADECE Bilgi Kaynağı'ndan ver.

---
Konuşma Geçmişi:
{{history}}
---

"#
            .to_string(),
        }
    }
}

impl Prompts {
    /// Load prompts from the default location, with optional custom directory and variables.
    pub fn load(
        custom_dir: Option<&str>,
        custom_variables: Option<&std::collections::HashMap<String, String>>,
    ) -> crate::error::Result<Self> {
        let mut prompts = Prompts::default();

        if let Some(vars) = custom_variables {
            prompts.variables = vars.clone();
        }

        if let Some(dir) = custom_dir {
            let custom_path = PathBuf::from(shellexpand::tilde(dir).to_string());

            let answer_path = custom_path.join("answer.toml");
            if answer_path.exists() {
                let content = std::fs::read_to_string(&answer_path)?;
                prompts.answer = toml::from_str(&content)?;
            }
        }

        Ok(prompts)
    }

    /// Render a prompt template with the given variables.
    pub fn render(template: &str, vars: &std::collections::HashMap<String, String>) -> String {
        let mut result = template.to_string();
        for (key, value) in vars {
            result = result.replace(&format!("{{{{{}}}}}", key), value);
        }
        result
    }

    /// Render a prompt template with both provided variables and custom config variables.
    /// Provided variables take precedence over custom config variables.
    pub fn render_with_custom(
        &self,
        template: &str,
        vars: &std::collections::HashMap<String, String>,
    ) -> String {
        let mut merged = self.variables.clone();
        for (key, value) in vars {
            merged.insert(key.clone(), value.clone());
        }
        Self::render(template, &merged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_template_carries_the_policy() {
        let prompts = AnswerPrompts::default();

        assert!(prompts.template.contains(REFUSAL_SENTENCE));
        assert!(prompts.template.contains("KESİNLİKLE KULLANMA"));
        assert!(prompts.template.contains("{{knowledge}}"));
        assert!(prompts.template.contains("{{question}}"));
        assert!(prompts.template.contains("{{history_section}}"));
        assert!(prompts.history_section.contains("{{history}}"));
    }

    #[test]
    fn test_render_replaces_slots() {
        let mut vars = HashMap::new();
        vars.insert("question".to_string(), "Paket A nedir?".to_string());

        let rendered = Prompts::render("Soru: {{question}}", &vars);
        assert_eq!(rendered, "Soru: Paket A nedir?");
    }

    #[test]
    fn test_provided_vars_override_custom_vars() {
        let mut prompts = Prompts::default();
        prompts
            .variables
            .insert("company".to_string(), "Acme".to_string());

        let mut vars = HashMap::new();
        vars.insert("company".to_string(), "BulutSantral".to_string());

        let rendered = prompts.render_with_custom("{{company}}", &vars);
        assert_eq!(rendered, "BulutSantral");
    }
}
