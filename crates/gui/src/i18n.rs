use std::sync::atomic::{AtomicU8, Ordering};

use nox_configurator_lib::state::form::Field;
use nox_configurator_lib::state::settings::Language;
use nox_configurator_lib::validation::ValidationError;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Lang {
    En,
    Ru,
}

impl From<Language> for Lang {
    fn from(language: Language) -> Self {
        match language {
            Language::English => Lang::En,
            Language::Russian => Lang::Ru,
        }
    }
}

static CURRENT_LANG: AtomicU8 = AtomicU8::new(0); // 0=En (default)

pub fn lang() -> Lang {
    match CURRENT_LANG.load(Ordering::Relaxed) {
        1 => Lang::Ru,
        _ => Lang::En,
    }
}

pub fn set_lang(l: Lang) {
    CURRENT_LANG.store(
        match l {
            Lang::En => 0,
            Lang::Ru => 1,
        },
        Ordering::Relaxed,
    );
}

/// Label for a form field in the current language
pub fn field_label(field: Field) -> &'static str {
    match field {
        Field::Name => t("form.name"),
        Field::Email => t("form.email"),
        Field::Phone => t("form.phone"),
        Field::Length => t("form.length"),
        Field::Width => t("form.width"),
        Field::Height => t("form.height"),
        Field::Quantity => t("form.quantity"),
        Field::Material => t("form.material"),
        Field::RoughCutting => t("form.rough_cutting"),
        Field::EyeBoltHoles => t("form.eye_bolt_holes"),
        Field::MountingHoles => t("form.mounting_holes"),
        Field::AdditionalComments => t("form.comments"),
    }
}

/// Reason a form failed to validate, with field names in the current language
pub fn validation_reason(error: &ValidationError) -> String {
    let ru = lang() == Lang::Ru;
    match error {
        ValidationError::Required { field } => {
            let label = field_label(*field);
            if ru { format!("Поле «{label}» обязательно") } else { format!("{label} is required") }
        }
        ValidationError::NotANumber { field, raw } => {
            let label = field_label(*field);
            if ru {
                format!("«{label}» должно быть числом (введено \"{raw}\")")
            } else {
                format!("{label} must be a number (got \"{raw}\")")
            }
        }
        ValidationError::NotFinite { field } => {
            let label = field_label(*field);
            if ru { format!("«{label}» должно быть конечным числом") } else { format!("{label} must be a finite number") }
        }
        ValidationError::NonPositive { field, value } => {
            let label = field_label(*field);
            if ru {
                format!("«{label}» должно быть больше нуля (введено {value})")
            } else {
                format!("{label} must be greater than zero (got {value})")
            }
        }
        ValidationError::InvalidQuantity { raw } => {
            if ru {
                format!("Количество должно быть целым числом не меньше 1 (введено \"{raw}\")")
            } else {
                format!("Quantity must be a whole number of at least 1 (got \"{raw}\")")
            }
        }
        ValidationError::InvalidEmail { raw } => {
            if ru { format!("Адрес \"{raw}\" некорректен") } else { format!("Email address \"{raw}\" is not valid") }
        }
    }
}

/// Translate a key to the current language.
pub fn t(key: &str) -> &'static str {
    let ru = lang() == Lang::Ru;
    match key {
        // ── Header ──────────────────────────────────────────
        "header.brand" => "NOX METALS",
        "header.title" => if ru { "Заказ алюминиевой заготовки" } else { "Custom Aluminum Block Order" },
        "header.settings" => if ru { "Настройки" } else { "Settings" },

        // ── Form sections ───────────────────────────────────
        "form.contact" => if ru { "Контактные данные" } else { "Contact Information" },
        "form.order" => if ru { "Параметры заказа" } else { "Order Details" },
        "form.options" => if ru { "Дополнительные операции" } else { "Additional Options" },

        // ── Fields ──────────────────────────────────────────
        "form.name" => if ru { "Имя" } else { "Name" },
        "form.email" => "Email",
        "form.phone" => if ru { "Телефон" } else { "Phone" },
        "form.length" => if ru { "Длина" } else { "Length" },
        "form.width" => if ru { "Ширина" } else { "Width" },
        "form.height" => if ru { "Высота" } else { "Height" },
        "form.quantity" => if ru { "Количество" } else { "Quantity" },
        "form.material" => if ru { "Материал" } else { "Material" },
        "form.rough_cutting" => if ru { "Черновая резка" } else { "Rough Cutting" },
        "form.eye_bolt_holes" => if ru { "Отверстия под рым-болты" } else { "Eye Bolt Holes" },
        "form.mounting_holes" => if ru { "Монтажные отверстия" } else { "Mounting Holes" },
        "form.comments" => if ru { "Комментарий" } else { "Additional Comments" },
        "form.submit" => if ru { "Отправить заказ" } else { "Submit Order" },
        "form.submitting" => if ru { "Отправка..." } else { "Submitting..." },

        // ── Preview ─────────────────────────────────────────
        "preview.title" => if ru { "Предпросмотр" } else { "Preview" },
        "preview.waiting" => if ru { "Введите размеры" } else { "Enter dimensions" },
        "preview.unavailable" => if ru { "3D недоступно" } else { "3D preview unavailable" },
        "preview.hint" => if ru {
            "ЛКМ: вращение  ПКМ: сдвиг  Колесо: масштаб"
        } else {
            "LMB: rotate  RMB: pan  Wheel: zoom"
        },

        // ── Notifications ───────────────────────────────────
        "notify.title" => if ru { "Заказ" } else { "Order" },
        "notify.success" => if ru { "Заказ успешно отправлен!" } else { "Order submitted successfully!" },
        "notify.rejected" => if ru {
            "Не удалось отправить заказ. Попробуйте ещё раз."
        } else {
            "Failed to submit order. Please try again."
        },
        "notify.failed" => if ru {
            "Произошла ошибка. Попробуйте позже."
        } else {
            "An error occurred. Please try again later."
        },
        "notify.invalid" => if ru { "Проверьте форму:" } else { "Please check the form:" },
        "notify.ok" => "OK",

        // ── Settings ────────────────────────────────────────
        "settings.title" => if ru { "Настройки" } else { "Settings" },
        "settings.general" => if ru { "Общие" } else { "General" },
        "settings.endpoint" => if ru { "Адрес приёма заказов" } else { "Order endpoint" },
        "settings.endpoint_note" => if ru {
            "Применяется после перезапуска"
        } else {
            "Takes effect after restart"
        },
        "settings.background" => if ru { "Фон" } else { "Background" },
        "settings.background_visible" => if ru { "Анимированный фон" } else { "Animated background" },
        "settings.background_opacity" => if ru { "Прозрачность линий" } else { "Line opacity" },
        "settings.preview" => if ru { "Предпросмотр" } else { "Preview" },
        "settings.rotation_speed" => if ru { "Скорость вращения" } else { "Rotation speed" },
        "settings.damping" => if ru { "Демпфирование" } else { "Damping" },
        "settings.ui" => if ru { "Интерфейс" } else { "Interface" },
        "settings.font_size" => if ru { "Размер шрифта" } else { "Font size" },
        "settings.language" => if ru { "Язык" } else { "Language" },
        "settings.reset" => if ru { "Сбросить" } else { "Reset" },
        "settings.close" => if ru { "Закрыть" } else { "Close" },

        // ── Fallback ────────────────────────────────────────
        _ => "???",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_field_has_a_label() {
        for field in Field::ALL {
            assert_ne!(field_label(field), "???", "{field:?}");
        }
    }

    #[test]
    fn test_validation_reason_follows_language() {
        let error = ValidationError::NonPositive {
            field: Field::Length,
            value: -1.0,
        };
        set_lang(Lang::Ru);
        let ru = validation_reason(&error);
        set_lang(Lang::En);
        let en = validation_reason(&error);

        assert_eq!(ru, "«Длина» должно быть больше нуля (введено -1)");
        assert_eq!(en, error.to_string());
    }
}
