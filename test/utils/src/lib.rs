pub fn resume_fixture() -> &'static str {
    return r#"
Jane Doe
Software Engineer

EXPERIENCE
Acme Payments - Backend Engineer (2021 - Present)
- Built a ledger reconciliation service in Rust handling 40k transactions per second.
- Migrated the settlement pipeline from cron jobs to Kafka consumers.

Globex - Full Stack Intern (2020)
- Shipped a React dashboard for warehouse throughput.

SKILLS
Rust, TypeScript, React, Node, PostgreSQL, Kafka

ACHIEVEMENTS
- 1st place, City Hackathon 2022 (offline-first mesh chat).
- ICPC Regionals, rank 14.
"#
    .trim();
}

pub fn feedback_fixture() -> &'static str {
    return r#"{
  "overall_score": 78,
  "detailed_metrics": {
    "technical_depth": 72,
    "communication_clarity": 85,
    "problem_solving": 74,
    "experience_relevance": 80
  },
  "section_analysis": {
    "experience": "Explained the ledger service clearly, light on failure handling.",
    "technical_skills": "Solid grasp of Kafka consumer groups, vague on PostgreSQL MVCC.",
    "achievements": "Hackathon win was well framed with concrete constraints."
  },
  "strengths": ["Clear structure", "Owns trade-offs"],
  "areas_for_improvement": ["Database internals", "Quantifying impact"],
  "critical_missing_points": "Did not explain idempotency of the reconciliation jobs.",
  "hiring_verdict": "Hire",
  "summary": "A capable backend engineer with good communication. Depth on storage internals is thin. Would benefit from more precise metrics."
}"#;
}

/// Builds a minimal PDF with one line of Helvetica text per page.
pub fn pdf_fixture(pages: &[&str]) -> Vec<u8> {
    let font_id = 3;
    let mut objects = vec![
        "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
        format!(
            "<< /Type /Pages /Kids [{}] /Count {} >>",
            (0..pages.len())
                .map(|idx| return format!("{} 0 R", 4 + idx * 2))
                .collect::<Vec<String>>()
                .join(" "),
            pages.len()
        ),
        "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>".to_string(),
    ];

    for (idx, text) in pages.iter().enumerate() {
        let content = format!("BT /F1 12 Tf 72 720 Td ({text}) Tj ET");
        objects.push(format!(
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] /Resources << /Font << /F1 {font_id} 0 R >> >> /Contents {} 0 R >>",
            5 + idx * 2
        ));
        objects.push(format!(
            "<< /Length {} >>\nstream\n{content}\nendstream",
            content.len()
        ));
    }

    let mut pdf = "%PDF-1.4\n".to_string();
    let mut offsets = vec![];
    for (idx, object) in objects.iter().enumerate() {
        offsets.push(pdf.len());
        pdf.push_str(&format!("{} 0 obj\n{object}\nendobj\n", idx + 1));
    }

    let xref_offset = pdf.len();
    pdf.push_str(&format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1));
    for offset in offsets {
        pdf.push_str(&format!("{offset:010} 00000 n \n"));
    }
    pdf.push_str(&format!(
        "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{xref_offset}\n%%EOF\n",
        objects.len() + 1
    ));

    return pdf.into_bytes();
}
