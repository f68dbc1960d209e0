use placement::candidates::CandidateReport;
use placement::scheduling::ScheduleEntry;
use placement::Candidate;
use std::io::{self, Write};

pub(crate) fn candidate_line(candidate: &Candidate) -> String {
    format!(
        "ID: {}, Name: {}, GPA: {}, Experience: {}, Skills: {}, Coding Marks: {}",
        candidate.id,
        candidate.name,
        candidate.gpa,
        candidate.experience,
        candidate.skills_label(),
        candidate.coding_marks
    )
}

pub(crate) fn sorted_line(candidate: &Candidate) -> String {
    format!(
        "GPA: {}, ID: {}, Name: {}",
        candidate.gpa, candidate.id, candidate.name
    )
}

pub(crate) fn render_schedule<W: Write>(entries: &[ScheduleEntry], out: &mut W) -> io::Result<()> {
    writeln!(out, "Interview Schedule:")?;
    if entries.is_empty() {
        writeln!(out, "No interview slots registered.")?;
    }
    for entry in entries {
        writeln!(out, "Time: {}, Candidate: {}", entry.time, entry.candidate)?;
    }
    Ok(())
}

pub(crate) fn render_report<W: Write>(report: &CandidateReport, out: &mut W) -> io::Result<()> {
    writeln!(out, "\nReport:")?;
    writeln!(out, "Total candidates: {}", report.total_candidates)?;
    writeln!(out, "Shortlisted candidates: {}", report.shortlisted_candidates)?;
    writeln!(out, "Details of all candidates:")?;
    for candidate in &report.candidates {
        writeln!(out, "{}", candidate_line(candidate))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn candidate_line_joins_skills_for_display() {
        let candidate = Candidate::new(1, "Alice", 3.8, 3, ["Python", "SQL"], 80.0);
        assert_eq!(
            candidate_line(&candidate),
            "ID: 1, Name: Alice, GPA: 3.8, Experience: 3, Skills: Python, SQL, Coding Marks: 80"
        );
    }

    #[test]
    fn report_lists_counts_before_details() {
        let report = CandidateReport {
            total_candidates: 1,
            shortlisted_candidates: 0,
            candidates: vec![Candidate::new(4, "Ravi", 3.0, 1, ["C"], 50.5)],
        };
        let mut out = Vec::new();
        render_report(&report, &mut out).expect("renders");
        let text = String::from_utf8(out).expect("utf8");

        assert!(text.contains("Total candidates: 1\nShortlisted candidates: 0\n"));
        assert!(text.contains("ID: 4, Name: Ravi"));
    }
}
