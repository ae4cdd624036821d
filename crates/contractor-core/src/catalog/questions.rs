use super::model::Question;
use crate::contract::ContractType;
use crate::template::PlaceholderStyle;
use crate::validator::FieldKind;

// ============================================================================
// Catalogs
// ============================================================================

const AGENT: &[Question] = &[
    Question::new(
        "contract_name",
        "📝 Введите название договора (например: №1, №АС-2024-001):",
        FieldKind::ContractName,
    ),
    Question::new(
        "contract_name_en",
        "📝 Введите название договора на английском языке:",
        FieldKind::ContractName,
    ),
    Question::new(
        "contract_date",
        "📅 Введите дату договора в формате ДД.ММ.ГГГГ:",
        FieldKind::Date,
    ),
    Question::new(
        "agent_name",
        "👤 Введите название/ФИО Агента:",
        FieldKind::PartyName("Имя агента"),
    ),
    Question::new(
        "agent_name_en",
        "👤 Введите название/ФИО Агента на английском языке:",
        FieldKind::PartyName("Имя агента"),
    ),
    Question::new(
        "principal_name",
        "🏢 Введите название/ФИО Принципала:",
        FieldKind::PartyName("Имя принципала"),
    ),
    Question::new(
        "principal_name_en",
        "🏢 Введите название/ФИО Принципала на английском языке:",
        FieldKind::PartyName("Имя принципала"),
    ),
    Question::new(
        "reward",
        "💰 Введите размер вознаграждения (цифрами и прописью):",
        FieldKind::Money,
    ),
    Question::new(
        "reward_en",
        "💰 Введите размер вознаграждения на английском языке:",
        FieldKind::Money,
    ),
    Question::new(
        "requisites",
        "🏦 Введите реквизиты сторон:",
        FieldKind::Requisites,
    ),
    Question::new(
        "assignment_details",
        "📝 Введите детали поручения:",
        FieldKind::text("Детали поручения"),
    ),
    Question::new(
        "report_details",
        "📊 Введите детали для акта отчета:",
        FieldKind::text("Детали отчета"),
    ),
];

const SUBAGENT: &[Question] = &[
    Question::new(
        "contract_name",
        "📝 Введите название договора (например: №1, №САС-2024-001):",
        FieldKind::ContractName,
    ),
    Question::new(
        "contract_name_en",
        "📝 Введите название договора на английском языке:",
        FieldKind::ContractName,
    ),
    Question::new(
        "contract_date",
        "📅 Введите дату договора в формате ДД.ММ.ГГГГ:",
        FieldKind::Date,
    ),
    Question::new(
        "agent_name",
        "👤 Введите название/ФИО Агента:",
        FieldKind::PartyName("Имя агента"),
    ),
    Question::new(
        "agent_name_en",
        "👤 Введите название/ФИО Агента на английском языке:",
        FieldKind::PartyName("Имя агента"),
    ),
    Question::new(
        "subagent_name",
        "👥 Введите название/ФИО Субагента:",
        FieldKind::PartyName("Имя субагента"),
    ),
    Question::new(
        "subagent_name_en",
        "👥 Введите название/ФИО Субагента на английском языке:",
        FieldKind::PartyName("Имя субагента"),
    ),
    Question::new(
        "principal_name",
        "🏢 Введите название/ФИО Принципала:",
        FieldKind::PartyName("Имя принципала"),
    ),
    Question::new(
        "principal_name_en",
        "🏢 Введите название/ФИО Принципала на английском языке:",
        FieldKind::PartyName("Имя принципала"),
    ),
    Question::new(
        "agreement_subject",
        "📋 Введите предмет соглашения:",
        FieldKind::text("Предмет соглашения"),
    ),
    Question::new(
        "reward",
        "💰 Введите размер вознаграждения:",
        FieldKind::Money,
    ),
    Question::new(
        "requisites",
        "🏦 Введите реквизиты сторон:",
        FieldKind::Requisites,
    ),
    Question::new(
        "assignment_details",
        "📝 Введите детали поручения:",
        FieldKind::text("Детали поручения"),
    ),
    Question::new(
        "report_details",
        "📊 Введите детали для акта отчета:",
        FieldKind::text("Детали отчета"),
    ),
];

const DELIVERY: &[Question] = &[
    Question::new(
        "contract_name",
        "📝 Введите название договора (например: №1, №ДП-2024-001):",
        FieldKind::ContractName,
    ),
    Question::new(
        "contract_name_en",
        "📝 Введите название договора на английском языке:",
        FieldKind::ContractName,
    ),
    Question::new(
        "contract_date",
        "📅 Введите дату договора в формате ДД.ММ.ГГГГ:",
        FieldKind::Date,
    ),
    Question::new(
        "supplier_name",
        "🏭 Введите название/ФИО Поставщика:",
        FieldKind::PartyName("Имя поставщика"),
    ),
    Question::new(
        "supplier_name_en",
        "🏭 Введите название/ФИО Поставщика на английском языке:",
        FieldKind::PartyName("Имя поставщика"),
    ),
    Question::new(
        "buyer_name",
        "🛒 Введите название/ФИО Покупателя:",
        FieldKind::PartyName("Имя покупателя"),
    ),
    Question::new(
        "buyer_name_en",
        "🛒 Введите название/ФИО Покупателя на английском языке:",
        FieldKind::PartyName("Имя покупателя"),
    ),
    Question::new(
        "goods_services",
        "📦 Введите перечень товаров/услуг:",
        FieldKind::text("Перечень товаров"),
    ),
    Question::new(
        "price_payment_terms",
        "💰 Введите цену и условия оплаты:",
        FieldKind::Money,
    ),
    Question::new(
        "delivery_terms",
        "🚚 Введите сроки поставки:",
        FieldKind::text("Сроки поставки"),
    ),
    Question::new(
        "responsibility",
        "⚖️ Введите ответственность сторон:",
        FieldKind::text("Ответственность сторон"),
    ),
    Question::new(
        "requisites",
        "🏦 Введите реквизиты сторон:",
        FieldKind::Requisites,
    ),
];

/// Placeholder names whose presence marks a template as localized, in
/// addition to the `_en` fields of the catalogs.
///
/// A marker must never equal a catalog key, or a template that merely
/// uses that field would switch the session to the localized flow.
pub const LOCALIZED_MARKERS: &[&str] = &[
    "number",
    "company",
    "agent",
    "principal",
    "subagent",
    "supplier",
    "purchaser",
    "subject",
];

// ============================================================================
// Lookups
// ============================================================================

/// The ordered catalog for a contract type.
pub fn questions(contract_type: ContractType) -> &'static [Question] {
    match contract_type {
        ContractType::Agent => AGENT,
        ContractType::Subagent => SUBAGENT,
        ContractType::Delivery => DELIVERY,
    }
}

/// The question at `index`, or `None` past the end of the catalog.
pub fn question(contract_type: ContractType, index: usize) -> Option<&'static Question> {
    questions(contract_type).get(index)
}

/// First index at or after `from` whose question applies, or `None` when the
/// catalog is exhausted.
pub fn next_index(contract_type: ContractType, from: usize, localized: bool) -> Option<usize> {
    questions(contract_type)
        .iter()
        .enumerate()
        .skip(from)
        .find(|(_, q)| q.applies(localized))
        .map(|(index, _)| index)
}

/// Every token that marks a template as carrying localized fields.
pub fn localized_tokens(style: PlaceholderStyle) -> Vec<String> {
    let catalog_keys = ContractType::ALL
        .iter()
        .flat_map(|ct| questions(*ct).iter())
        .filter(|q| q.is_localized())
        .map(|q| q.key);

    let mut tokens: Vec<String> = LOCALIZED_MARKERS
        .iter()
        .copied()
        .chain(catalog_keys)
        .map(|key| style.token(key))
        .collect();
    tokens.sort();
    tokens.dedup();
    tokens
}

/// Scans template text for any localized token (exact, case-sensitive).
pub fn has_localized_placeholders(template_text: &str, style: PlaceholderStyle) -> bool {
    localized_tokens(style)
        .iter()
        .any(|token| template_text.contains(token.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_keys_are_unique_per_catalog() {
        for contract_type in ContractType::ALL {
            let keys: Vec<_> = questions(contract_type).iter().map(|q| q.key).collect();
            let unique: HashSet<_> = keys.iter().collect();
            assert_eq!(keys.len(), unique.len(), "{contract_type} has duplicate keys");
        }
    }

    #[test]
    fn test_delivery_without_localized_fields_has_nine_questions() {
        let asked = questions(ContractType::Delivery)
            .iter()
            .filter(|q| q.applies(false))
            .count();
        assert_eq!(asked, 9);
    }

    #[test]
    fn test_next_index_skips_localized_fields() {
        // contract_name_en sits at index 1
        assert_eq!(next_index(ContractType::Agent, 1, false), Some(2));
        assert_eq!(next_index(ContractType::Agent, 1, true), Some(1));
    }

    #[test]
    fn test_next_index_past_end() {
        let len = questions(ContractType::Delivery).len();
        assert_eq!(next_index(ContractType::Delivery, len, true), None);
        assert!(question(ContractType::Delivery, len).is_none());
    }

    #[test]
    fn test_markers_never_shadow_catalog_keys() {
        let style = PlaceholderStyle::DoubleBraceUpper;
        for contract_type in ContractType::ALL {
            for question in questions(contract_type) {
                if question.is_localized() {
                    continue;
                }
                assert!(
                    !LOCALIZED_MARKERS.contains(&question.key),
                    "{} is both a marker and a {contract_type} field",
                    question.key
                );
                let token = style.token(question.key);
                assert!(
                    !has_localized_placeholders(&token, style),
                    "{token} alone must not mark a template as localized"
                );
            }
        }
    }

    #[test]
    fn test_reward_placeholder_is_not_a_localized_marker() {
        let style = PlaceholderStyle::DoubleBraceUpper;
        assert!(!has_localized_placeholders("Вознаграждение: {{REWARD}}", style));
        assert!(has_localized_placeholders("Reward: {{REWARD_EN}}", style));
    }

    #[test]
    fn test_localized_detection_is_exact() {
        let style = PlaceholderStyle::DoubleBraceUpper;
        assert!(has_localized_placeholders("Agent: {{AGENT}}", style));
        assert!(has_localized_placeholders("{{SUPPLIER_NAME_EN}}", style));
        assert!(!has_localized_placeholders("{{agent}}", style));
        assert!(!has_localized_placeholders("{{AGENT_NAME}}", style));
    }
}
