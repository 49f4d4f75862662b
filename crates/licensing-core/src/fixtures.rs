use serde_json::json;

use crate::model::{Priority, Rule, ISRAEL_POLICE, MINISTRY_OF_HEALTH};

pub fn rule(id: &str, title: &str, authority: &str, priority: Priority) -> Rule {
    Rule {
        id: id.to_string(),
        title: title.to_string(),
        desc_he: String::new(),
        desc_en: format!("{title} (details)"),
        authority: authority.to_string(),
        priority,
        source_ref: format!("§{}", id.len()),
        triggers: json!({}),
    }
}

pub fn ids(raw: &[&str]) -> Vec<String> {
    raw.iter().map(|s| s.to_string()).collect()
}

pub fn sample_catalog() -> Vec<Rule> {
    serde_json::from_value(json!([
        {
            "id": "R-Police-CCTV-Resolution",
            "title": "CCTV ≥1.3MP + backup",
            "desc_he": "טמ\"ס ברזולוציה 1.3MP לפחות, גיבוי חצי שעה להקלטה ולספקי כוח.",
            "desc_en": "CCTV at ≥1.3MP with ≥30-min backup for recorder and camera power.",
            "authority": ISRAEL_POLICE,
            "priority": "high",
            "source_ref": "§3.3.1(1,3)",
            "triggers": { "flags": { "serves_alcohol": true } }
        },
        {
            "id": "R-Police-CCTV-Placement",
            "title": "CCTV placement at entrance & facade",
            "desc_he": "מצלמות בכניסה פנימה ולכיוון חזית העסק עד 10 מ'.",
            "desc_en": "Place cameras at entrance (inward) and on facade covering up to 10m outward.",
            "authority": ISRAEL_POLICE,
            "priority": "medium",
            "source_ref": "§3.3.2(1–2)",
            "triggers": { "flags": { "serves_alcohol": true } }
        },
        {
            "id": "R-Police-Alcohol-Minors-Sign",
            "title": "Signage: no alcohol under 18",
            "desc_he": "שילוט בכניסה: אסור למכור/להגיש משקאות משכרים למי שטרם מלאו לו 18.",
            "desc_en": "Entrance sign: alcohol may not be sold/served to under-18.",
            "authority": ISRAEL_POLICE,
            "priority": "high",
            "source_ref": "§3.6.1",
            "triggers": { "flags": { "serves_alcohol": true } }
        },
        {
            "id": "R-MoH-Water-Quality",
            "title": "Water quality testing",
            "desc_he": "בדיקות איכות מים תקופתיות ותיעוד התוצאות.",
            "desc_en": "Regular water quality testing and documentation of results.",
            "authority": MINISTRY_OF_HEALTH,
            "priority": "high",
            "source_ref": "§4.2.1",
            "triggers": {}
        },
        {
            "id": "R-MoH-Gas-Safety-Ventilation",
            "title": "Gas equipment ventilation",
            "desc_he": "אוורור מתאים לציוד גז במטבח.",
            "desc_en": "Proper ventilation for gas equipment in kitchen.",
            "authority": MINISTRY_OF_HEALTH,
            "priority": "high",
            "source_ref": "§4.5.2(1–3)",
            "triggers": { "flags": { "uses_gas": true } }
        },
        {
            "id": "R-MoH-Food-Temperature-Monitor",
            "title": "Temperature monitoring systems",
            "desc_he": "מערכות ניטור טמפרטורה למזון.",
            "desc_en": "Food temperature monitoring systems.",
            "authority": MINISTRY_OF_HEALTH,
            "priority": "medium",
            "source_ref": "§4.3.4",
            "triggers": {}
        }
    ]))
    .expect("sample catalog is valid")
}
