/*
 * template_context.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Template context building.
//!
//! The renderer applies no defaults of its own, so every caption and
//! placeholder a layout may print is filled in here. The resulting context
//! has these top-level fields:
//!
//! - `layout`: the layout record with header and footer captions defaulted
//! - `company`: the primary (first selected) job's company
//! - `jobs`: the selected jobs, with empty bullet lists replaced by a placeholder
//! - `primaryJob`, `jobCount`
//! - `benefits`, `hasBenefits`: union of all selected jobs' benefits
//! - `apply`, `interviewAddress`, `contactPhone`, `contactLine`: footer data
//!   taken from the primary job
//! - `labels`: fixed captions used by the built-in template

use serde_json::{Map, Value, json};

use jobpost_template::TemplateValue;

use crate::records::{Job, Layout};

pub const DEFAULT_HEADER_TITLE: &str = "We are hiring";
pub const DEFAULT_HEADER_SUBTITLE: &str = "Tuyển dụng";
pub const DEFAULT_COMPANY: &str = "Doanh nghiệp";
pub const DEFAULT_APPLY_LABEL: &str = "Nộp hồ sơ";
pub const DEFAULT_INTERVIEW_LABEL: &str = "Địa điểm phỏng vấn";
pub const DEFAULT_CONTACT_LABEL: &str = "Liên hệ";
pub const DEFAULT_APPLY_INSTRUCTIONS: &str = "Liên hệ bộ phận nhân sự để được hướng dẫn.";
pub const DEFAULT_INTERVIEW_ADDRESS: &str = "Sẽ thông báo sau khi đạt phỏng vấn.";
pub const DEFAULT_CONTACT_PHONE: &str = "---";
pub const EMPTY_LIST_PLACEHOLDER: &str = "Đang cập nhật.";
pub const BENEFITS_TITLE: &str = "Chế độ đãi ngộ";
pub const DEADLINE_LABEL: &str = "Hạn chót:";
pub const APPLY_LINK_LABEL: &str = "Link ứng tuyển";

/// Build the rendering context for `layout` and the selected `jobs`.
///
/// `jobs` is expected to be non-empty; with no jobs the job-derived fields
/// fall back to their defaults.
pub fn build_context(layout: &Layout, jobs: &[&Job]) -> TemplateValue {
    let primary = jobs.first().copied();

    let company = primary
        .and_then(|job| job.company.clone())
        .or_else(|| layout.header_subtitle.clone())
        .unwrap_or_else(|| DEFAULT_COMPANY.to_string());

    let apply = primary.and_then(|job| job.apply.as_ref());
    let deadline = primary.and_then(Job::deadline);
    let contact_phone = primary
        .and_then(|job| job.contact_phone.clone())
        .unwrap_or_else(|| DEFAULT_CONTACT_PHONE.to_string());
    let contact_line = match deadline {
        Some(deadline) if !deadline.is_empty() => {
            format!("{} • {} {}", contact_phone, DEADLINE_LABEL, deadline)
        }
        _ => contact_phone.clone(),
    };

    let benefits = collect_benefits(jobs);

    let context = json!({
        "layout": layout_value(layout),
        "company": company,
        "jobs": jobs.iter().map(|job| job_value(job)).collect::<Vec<_>>(),
        "primaryJob": primary.map(job_value).unwrap_or(Value::Null),
        "jobCount": jobs.len(),
        "hasBenefits": !benefits.is_empty(),
        "benefits": benefits,
        "apply": {
            "instructions": apply
                .and_then(|a| a.instructions.clone())
                .unwrap_or_else(|| DEFAULT_APPLY_INSTRUCTIONS.to_string()),
            "deadline": deadline,
            "applyLink": apply.and_then(|a| a.apply_link.clone()),
        },
        "interviewAddress": primary
            .and_then(|job| job.interview_address.clone())
            .unwrap_or_else(|| DEFAULT_INTERVIEW_ADDRESS.to_string()),
        "contactPhone": contact_phone,
        "contactLine": contact_line,
        "labels": {
            "benefitsTitle": BENEFITS_TITLE,
            "deadline": DEADLINE_LABEL,
            "applyLink": APPLY_LINK_LABEL,
        },
    });

    TemplateValue::from(context)
}

/// The layout record with every caption defaulted.
fn layout_value(layout: &Layout) -> Value {
    let footer = layout.footer.clone().unwrap_or_default();
    let mut value = match serde_json::to_value(layout) {
        Ok(Value::Object(map)) => map,
        _ => Map::new(),
    };
    // The template source is not data
    value.remove("template");

    value.insert(
        "headerTitle".to_string(),
        json!(layout.header_title.as_deref().unwrap_or(DEFAULT_HEADER_TITLE)),
    );
    value.insert(
        "headerSubtitle".to_string(),
        json!(layout.header_subtitle.as_deref().unwrap_or(DEFAULT_HEADER_SUBTITLE)),
    );
    value.insert(
        "tagline".to_string(),
        json!(layout.tagline.as_deref().unwrap_or("")),
    );
    value.insert(
        "footer".to_string(),
        json!({
            "applyLabel": footer.apply_label.as_deref().unwrap_or(DEFAULT_APPLY_LABEL),
            "interviewLabel": footer.interview_label.as_deref().unwrap_or(DEFAULT_INTERVIEW_LABEL),
            "contactLabel": footer.contact_label.as_deref().unwrap_or(DEFAULT_CONTACT_LABEL),
        }),
    );
    Value::Object(value)
}

/// A job record with empty bullet lists replaced by the placeholder.
fn job_value(job: &Job) -> Value {
    let mut value = match serde_json::to_value(job) {
        Ok(Value::Object(map)) => map,
        _ => Map::new(),
    };
    for key in ["description", "requirements"] {
        let empty = value
            .get(key)
            .and_then(Value::as_array)
            .is_none_or(|items| items.is_empty());
        if empty {
            value.insert(key.to_string(), json!([EMPTY_LIST_PLACEHOLDER]));
        }
    }
    Value::Object(value)
}

/// Benefits of all jobs, de-duplicated in first-seen order.
fn collect_benefits(jobs: &[&Job]) -> Vec<String> {
    let mut benefits: Vec<String> = Vec::new();
    for benefit in jobs.iter().flat_map(|job| job.benefits.iter()) {
        if !benefits.contains(benefit) {
            benefits.push(benefit.clone());
        }
    }
    benefits
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{ApplyInfo, FooterLabels};
    use pretty_assertions::assert_eq;

    fn get<'v>(value: &'v TemplateValue, path: &[&str]) -> &'v TemplateValue {
        value
            .get_path(path)
            .unwrap_or_else(|| panic!("missing {:?}", path))
    }

    fn text(s: &str) -> TemplateValue {
        TemplateValue::String(s.to_string())
    }

    fn job(id: &str) -> Job {
        Job {
            id: Some(id.to_string()),
            title: format!("Job {}", id),
            ..Default::default()
        }
    }

    fn layout() -> Layout {
        Layout {
            id: "classic".to_string(),
            name: "Classic".to_string(),
            template: Some("{{company}}".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_layout_defaults() {
        let job = job("a");
        let ctx = build_context(&layout(), &[&job]);

        assert_eq!(get(&ctx, &["layout", "id"]), &text("classic"));
        assert_eq!(get(&ctx, &["layout", "headerTitle"]), &text(DEFAULT_HEADER_TITLE));
        assert_eq!(
            get(&ctx, &["layout", "headerSubtitle"]),
            &text(DEFAULT_HEADER_SUBTITLE)
        );
        assert_eq!(get(&ctx, &["layout", "tagline"]), &text(""));
        assert_eq!(
            get(&ctx, &["layout", "footer", "contactLabel"]),
            &text(DEFAULT_CONTACT_LABEL)
        );
        assert!(ctx.get_path(&["layout", "template"]).is_none());
    }

    #[test]
    fn test_layout_overrides() {
        let mut layout = layout();
        layout.header_title = Some("Join us".to_string());
        layout.tagline = Some("Grow with us".to_string());
        layout.footer = Some(FooterLabels {
            apply_label: Some("Apply".to_string()),
            ..Default::default()
        });

        let job = job("a");
        let ctx = build_context(&layout, &[&job]);
        assert_eq!(get(&ctx, &["layout", "headerTitle"]), &text("Join us"));
        assert_eq!(get(&ctx, &["layout", "tagline"]), &text("Grow with us"));
        assert_eq!(get(&ctx, &["layout", "footer", "applyLabel"]), &text("Apply"));
        assert_eq!(
            get(&ctx, &["layout", "footer", "interviewLabel"]),
            &text(DEFAULT_INTERVIEW_LABEL)
        );
    }

    #[test]
    fn test_company_fallbacks() {
        let mut with_company = job("a");
        with_company.company = Some("ABC".to_string());
        let ctx = build_context(&layout(), &[&with_company, &job("b")]);
        assert_eq!(get(&ctx, &["company"]), &text("ABC"));

        let mut subtitled = layout();
        subtitled.header_subtitle = Some("Tập đoàn XYZ".to_string());
        let plain = job("b");
        let ctx = build_context(&subtitled, &[&plain]);
        assert_eq!(get(&ctx, &["company"]), &text("Tập đoàn XYZ"));

        let ctx = build_context(&layout(), &[&plain]);
        assert_eq!(get(&ctx, &["company"]), &text(DEFAULT_COMPANY));
    }

    #[test]
    fn test_job_list_placeholders() {
        let mut a = job("a");
        a.description = vec!["Viết code".to_string()];
        let ctx = build_context(&layout(), &[&a]);

        assert_eq!(
            get(&ctx, &["jobs", "0", "description"]),
            &TemplateValue::from(vec!["Viết code"])
        );
        assert_eq!(
            get(&ctx, &["jobs", "0", "requirements"]),
            &TemplateValue::from(vec![EMPTY_LIST_PLACEHOLDER])
        );
        assert_eq!(get(&ctx, &["jobCount"]), &TemplateValue::Number(1.0));
        assert!(ctx.get_path(&["jobs", "0", "department"]).is_none());
    }

    #[test]
    fn test_benefits_union() {
        let mut a = job("a");
        a.benefits = vec!["Lương tháng 13".to_string(), "Bảo hiểm".to_string()];
        let mut b = job("b");
        b.benefits = vec!["Bảo hiểm".to_string(), "Du lịch".to_string()];

        let ctx = build_context(&layout(), &[&a, &b]);
        assert_eq!(
            get(&ctx, &["benefits"]),
            &TemplateValue::from(vec!["Lương tháng 13", "Bảo hiểm", "Du lịch"])
        );
        assert_eq!(get(&ctx, &["hasBenefits"]), &TemplateValue::Bool(true));

        let ctx = build_context(&layout(), &[&job("c")]);
        assert_eq!(get(&ctx, &["hasBenefits"]), &TemplateValue::Bool(false));
    }

    #[test]
    fn test_footer_defaults() {
        let ctx = build_context(&layout(), &[&job("a")]);
        assert_eq!(
            get(&ctx, &["apply", "instructions"]),
            &text(DEFAULT_APPLY_INSTRUCTIONS)
        );
        assert_eq!(get(&ctx, &["apply", "deadline"]), &TemplateValue::Null);
        assert_eq!(
            get(&ctx, &["interviewAddress"]),
            &text(DEFAULT_INTERVIEW_ADDRESS)
        );
        assert_eq!(get(&ctx, &["contactLine"]), &text(DEFAULT_CONTACT_PHONE));
    }

    #[test]
    fn test_footer_from_primary_job() {
        let mut a = job("a");
        a.contact_phone = Some("0901 234 567".to_string());
        a.interview_address = Some("12 Lê Lợi".to_string());
        a.apply = Some(ApplyInfo {
            instructions: Some("Gửi CV qua email".to_string()),
            deadline: Some("30/06".to_string()),
            apply_link: Some("https://abc.vn".to_string()),
        });
        let mut b = job("b");
        b.contact_phone = Some("999".to_string());

        let ctx = build_context(&layout(), &[&a, &b]);
        assert_eq!(get(&ctx, &["apply", "instructions"]), &text("Gửi CV qua email"));
        assert_eq!(get(&ctx, &["apply", "applyLink"]), &text("https://abc.vn"));
        assert_eq!(get(&ctx, &["interviewAddress"]), &text("12 Lê Lợi"));
        assert_eq!(
            get(&ctx, &["contactLine"]),
            &text("0901 234 567 • Hạn chót: 30/06")
        );
        assert_eq!(get(&ctx, &["primaryJob", "id"]), &text("a"));
    }
}
