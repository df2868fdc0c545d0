//! # Text Rendering
//!
//! Korean plain-text forms of every operation result, for clients that
//! show tool output to a person. All functions are pure. Truncation counts
//! characters, so multi-byte text is never split.

use std::fmt::Write;

use isms_catalog::CatalogSummary;
use isms_compliance::{ComplianceReport, ComplianceTally};
use isms_evidence::EvidenceDocument;
use isms_report::AuditReport;

use crate::engine::{RequirementDetail, SearchResponse};

const ELLIPSIS: &str = "...";

/// First `max_chars` characters of `text`, with `...` appended when cut.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => format!("{}{ELLIPSIS}", &text[..byte_idx]),
        None => text.to_string(),
    }
}

pub fn search(response: &SearchResponse, preview_chars: usize) -> String {
    if response.results.is_empty() {
        return format!("'{}' 관련 항목을 찾을 수 없습니다.", response.query);
    }

    let mut out = format!(
        "🔍 '{}' 검색 결과 ({}건)\n",
        response.query,
        response.results.len()
    );
    for hit in &response.results {
        let _ = writeln!(
            out,
            "\n[{}] {} (점수: {})\n  {}",
            hit.item_code,
            hit.title,
            hit.score,
            truncate_chars(&hit.certification_criteria, preview_chars)
        );
    }
    out
}

pub fn detail(detail: &RequirementDetail) -> String {
    let mut out = format!("📋 [{}] {}\n\n", detail.item_code, detail.title);
    let _ = writeln!(
        out,
        "■ 영역: {}. {}",
        detail.chapter.number(),
        detail.chapter_name
    );
    let _ = writeln!(
        out,
        "■ 분야: {} {}",
        detail.section,
        detail.section_name.as_deref().unwrap_or("")
    );
    let _ = writeln!(out, "\n■ 인증기준\n{}", detail.certification_criteria);
    out.push_str("\n■ 주요 확인사항\n");
    for (i, point) in detail.key_checkpoint.iter().enumerate() {
        let _ = writeln!(out, "{}. {point}", i + 1);
    }
    let _ = writeln!(out, "\n■ 증적자료 예시\n{}", detail.evidence_example);
    let _ = writeln!(out, "\n■ 결함사례\n{}", detail.defect_case);
    out
}

pub fn evidence(doc: &EvidenceDocument) -> String {
    let mut out = format!("📄 [{}] {} 증적자료\n\n{}\n", doc.item_code, doc.title, doc.rendered);
    if !doc.missing_facts.is_empty() {
        let _ = writeln!(
            out,
            "\n⚠️ 입력되지 않은 정보: {}",
            doc.missing_facts.join(", ")
        );
    }
    out
}

fn tally_line(tally: &ComplianceTally) -> String {
    format!(
        "{:.1}% ({}/{}) 충족 {} · 진행중 {} · 미착수 {} · 해당없음 {}",
        tally.percentage,
        tally.satisfied,
        tally.applicable(),
        tally.satisfied,
        tally.in_progress,
        tally.not_started,
        tally.not_applicable
    )
}

pub fn compliance(report: &ComplianceReport) -> String {
    let mut out = format!("📊 ISMS-P 준수 현황 (범위: {}장)\n\n", report.scope);
    for ch in &report.chapters {
        let _ = writeln!(
            out,
            "{}. {}: {}",
            ch.chapter.number(),
            ch.name,
            tally_line(&ch.tally)
        );
    }
    let _ = writeln!(
        out,
        "\n📈 준수율: {:.1}% ({}/{})",
        report.overall.percentage,
        report.overall.satisfied,
        report.overall.applicable()
    );
    if !report.unsatisfied_items.is_empty() {
        let _ = writeln!(
            out,
            "⚠️ 미충족 항목 {}건: {}",
            report.unsatisfied_items.len(),
            report.unsatisfied_items.join(", ")
        );
    }
    out
}

pub fn audit(report: &AuditReport) -> String {
    let mut out = format!("📑 ISMS-P 감사 보고서\n범위: {}장\n\n", report.scope);

    out.push_str("== 준수 현황 ==\n");
    out.push_str(&compliance(&report.compliance));

    let _ = writeln!(out, "\n== 개선 필요 항목 ({}건) ==", report.remediation.len());
    for item in &report.remediation {
        let _ = writeln!(
            out,
            "- [{}] {} ({}): {}",
            item.item_code,
            item.title,
            item.state.label(),
            item.hint
        );
        if let Some(note) = &item.note {
            let _ = writeln!(out, "  메모: {note}");
        }
    }

    if let Some(checklist) = &report.evidence_checklist {
        let _ = writeln!(out, "\n== 증적 체크리스트 ({}건) ==", checklist.len());
        for doc in checklist {
            let _ = writeln!(out, "- [{}] {}\n  {}", doc.item_code, doc.title, doc.rendered);
            if !doc.missing_facts.is_empty() {
                let _ = writeln!(out, "  ⚠️ 입력되지 않은 정보: {}", doc.missing_facts.join(", "));
            }
        }
    }

    if let (Some(focus), Some(related)) = (&report.focus, &report.related) {
        let _ = writeln!(out, "\n== 관련 요구사항 ('{}') ==", focus.query);
        if related.is_empty() {
            let _ = writeln!(out, "'{}' 관련 항목을 찾을 수 없습니다.", focus.query);
        }
        for hit in related {
            let _ = writeln!(out, "- [{}] {} (점수: {})", hit.item_code, hit.title, hit.score);
        }
    }
    out
}

pub fn catalog_summary(summary: &CatalogSummary) -> String {
    let mut out = format!("✅ 요구사항 {}개 로드됨\n\n", summary.total);
    for ch in &summary.chapters {
        let _ = writeln!(
            out,
            "{}. {}: {}개 (기준 {}개)",
            ch.chapter.number(),
            ch.name,
            ch.count,
            ch.expected
        );
    }
    out.push_str("\n샘플:\n");
    for row in &summary.sample {
        let _ = writeln!(out, "  {} {}", row.item_code, row.title);
    }
    out
}
