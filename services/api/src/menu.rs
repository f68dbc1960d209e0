use crate::render::{candidate_line, render_report, render_schedule, sorted_line};
use placement::candidates::{PersistenceAdapter, StoreError};
use placement::error::AppError;
use placement::{Candidate, CandidateId, PlacementSession, ShortlistCriteria};
use std::io::{self, BufRead, Write};
use std::str::FromStr;

const ENTRIES: [&str; 11] = [
    "1. Add Candidate",
    "2. Search Candidate by ID",
    "3. Search Candidate by GPA",
    "4. Sort Candidates by GPA",
    "5. Shortlist Candidates",
    "6. Filter Candidates by Coding Test Marks",
    "7. Schedule Interview",
    "8. View Schedule",
    "9. Generate All Candidate Details",
    "10. Delete Candidate",
    "11. Exit",
];

/// Why an action stopped before finishing.
enum Interrupt {
    /// A field failed to parse; the message is shown and the menu resumes.
    Invalid(String),
    /// Input ran out.
    Closed,
    Failed(AppError),
}

impl From<io::Error> for Interrupt {
    fn from(err: io::Error) -> Self {
        Interrupt::Failed(AppError::Io(err))
    }
}

impl From<StoreError> for Interrupt {
    fn from(err: StoreError) -> Self {
        Interrupt::Failed(AppError::Store(err))
    }
}

/// Numbered command loop over a placement session.
pub(crate) struct Menu<'s, P, R, W> {
    session: &'s mut PlacementSession<P>,
    input: R,
    output: W,
}

impl<'s, P, R, W> Menu<'s, P, R, W>
where
    P: PersistenceAdapter,
    R: BufRead,
    W: Write,
{
    pub(crate) fn new(session: &'s mut PlacementSession<P>, input: R, output: W) -> Self {
        Self {
            session,
            input,
            output,
        }
    }

    /// Runs until "11" is chosen or input ends.
    pub(crate) fn run(mut self) -> Result<(), AppError> {
        loop {
            writeln!(self.output, "\nCandidate Selection System Menu")?;
            for entry in ENTRIES {
                writeln!(self.output, "{entry}")?;
            }

            let Some(choice) = self.line("Enter your choice: ")? else {
                return Ok(());
            };

            let outcome = match choice.trim() {
                "1" => self.add(),
                "2" => self.search_by_id(),
                "3" => self.search_by_gpa(),
                "4" => self.sort_by_gpa(),
                "5" => self.shortlist(),
                "6" => self.filter_by_coding_marks(),
                "7" => self.schedule(),
                "8" => self.view_schedule(),
                "9" => self.report(),
                "10" => self.delete(),
                "11" => {
                    writeln!(self.output, "Exiting the system.")?;
                    return Ok(());
                }
                _ => {
                    writeln!(self.output, "Invalid choice. Please try again.")?;
                    continue;
                }
            };

            match outcome {
                Ok(()) => {}
                Err(Interrupt::Invalid(message)) => writeln!(self.output, "{message}")?,
                Err(Interrupt::Closed) => return Ok(()),
                Err(Interrupt::Failed(err)) => return Err(err),
            }
        }
    }

    fn add(&mut self) -> Result<(), Interrupt> {
        let id: u64 = self.field("Enter ID: ", "ID")?;
        let name = self.text("Enter Name: ")?;
        let gpa: f64 = self.field("Enter GPA: ", "GPA")?;
        let experience: i64 = self.field("Enter Experience (in years): ", "experience")?;
        let skills = split_skills(&self.text("Enter Skills (comma separated): ")?);
        let coding_marks: f64 = self.field("Enter marks in coding test: ", "coding marks")?;

        let candidate = Candidate::new(id, name.trim(), gpa, experience, skills, coding_marks);
        let name = candidate.name.clone();
        match self.session.store.add(candidate) {
            Ok(()) => writeln!(self.output, "Candidate {name} added successfully.")?,
            Err(StoreError::DuplicateId(id)) => {
                writeln!(self.output, "Candidate with ID {id} already exists.")?
            }
            Err(err) => return Err(err.into()),
        }
        Ok(())
    }

    fn search_by_id(&mut self) -> Result<(), Interrupt> {
        let id: u64 = self.field("Enter ID: ", "ID")?;
        match self.session.store.get(CandidateId(id)) {
            Some(candidate) => writeln!(self.output, "{}", candidate_line(candidate))?,
            None => writeln!(self.output, "Candidate not found.")?,
        }
        Ok(())
    }

    fn search_by_gpa(&mut self) -> Result<(), Interrupt> {
        let gpa: f64 = self.field("Enter GPA: ", "GPA")?;
        let lines: Vec<String> = self
            .session
            .store
            .search_by_gpa(gpa)
            .into_iter()
            .map(candidate_line)
            .collect();
        self.listing(None, &lines, "No candidates found with the specified GPA.")
    }

    fn sort_by_gpa(&mut self) -> Result<(), Interrupt> {
        let lines: Vec<String> = self
            .session
            .store
            .sort_by_gpa()
            .into_iter()
            .map(sorted_line)
            .collect();
        writeln!(self.output, "Candidates sorted by GPA:")?;
        for line in &lines {
            writeln!(self.output, "{line}")?;
        }
        Ok(())
    }

    fn shortlist(&mut self) -> Result<(), Interrupt> {
        let min_gpa: f64 = self.field("Enter minimum GPA: ", "GPA")?;
        let required_skills =
            split_skills(&self.text("Enter required skills (comma separated): ")?);
        let min_experience: i64 =
            self.field("Enter minimum experience (in years): ", "experience")?;
        let min_coding_marks: f64 =
            self.field("Enter minimum coding test marks: ", "coding marks")?;

        let criteria = ShortlistCriteria {
            min_gpa,
            required_skills,
            min_experience,
            min_coding_marks,
        };
        let header = format!(
            "Shortlisted candidates with min GPA {}, skills [{}], min experience {}, \
             and min coding test marks {}:",
            criteria.min_gpa,
            criteria.required_skills.join(", "),
            criteria.min_experience,
            criteria.min_coding_marks
        );
        let lines: Vec<String> = self
            .session
            .store
            .shortlist(&criteria)
            .into_iter()
            .map(candidate_line)
            .collect();
        self.listing(Some(&header), &lines, "No candidates matched the criteria.")
    }

    fn filter_by_coding_marks(&mut self) -> Result<(), Interrupt> {
        let min_marks: f64 = self.field("Enter minimum marks in coding test: ", "coding marks")?;
        let header = format!("Candidates with coding test marks >= {min_marks}:");
        let lines: Vec<String> = self
            .session
            .store
            .filter_by_coding_marks(min_marks)
            .into_iter()
            .map(candidate_line)
            .collect();
        self.listing(
            Some(&header),
            &lines,
            "No candidates found with the specified coding test marks.",
        )
    }

    fn schedule(&mut self) -> Result<(), Interrupt> {
        let time = self.text("Enter interview time (e.g., '10:00 AM'): ")?;
        let time = time.trim();
        let id: u64 = self.field("Enter candidate ID: ", "ID")?;

        match self.session.schedule_interview(time, CandidateId(id)) {
            Ok(candidate) => writeln!(
                self.output,
                "Candidate {} scheduled for interview at {time}.",
                candidate.name
            )?,
            Err(StoreError::NotFound(_)) => writeln!(self.output, "Candidate not found.")?,
            Err(err) => return Err(err.into()),
        }
        Ok(())
    }

    fn view_schedule(&mut self) -> Result<(), Interrupt> {
        let entries = self.session.scheduler.list_schedule();
        render_schedule(&entries, &mut self.output)?;
        Ok(())
    }

    fn report(&mut self) -> Result<(), Interrupt> {
        let report = self.session.store.report();
        render_report(&report, &mut self.output)?;
        Ok(())
    }

    fn delete(&mut self) -> Result<(), Interrupt> {
        let id: u64 = self.field("Enter candidate ID to delete: ", "ID")?;
        match self.session.store.delete(CandidateId(id)) {
            Ok(_) => writeln!(self.output, "Candidate with ID {id} deleted successfully.")?,
            Err(StoreError::NotFound(_)) => writeln!(self.output, "Candidate not found.")?,
            Err(err) => return Err(err.into()),
        }
        Ok(())
    }

    fn listing(
        &mut self,
        header: Option<&str>,
        lines: &[String],
        empty: &str,
    ) -> Result<(), Interrupt> {
        if lines.is_empty() {
            writeln!(self.output, "{empty}")?;
            return Ok(());
        }
        if let Some(header) = header {
            writeln!(self.output, "{header}")?;
        }
        for line in lines {
            writeln!(self.output, "{line}")?;
        }
        Ok(())
    }

    fn line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut buffer = String::new();
        if self.input.read_line(&mut buffer)? == 0 {
            return Ok(None);
        }
        let trimmed = buffer.trim_end_matches(['\r', '\n']).len();
        buffer.truncate(trimmed);
        Ok(Some(buffer))
    }

    fn text(&mut self, prompt: &str) -> Result<String, Interrupt> {
        self.line(prompt)?.ok_or(Interrupt::Closed)
    }

    fn field<T: FromStr>(&mut self, prompt: &str, what: &str) -> Result<T, Interrupt> {
        let raw = self.text(prompt)?;
        raw.trim()
            .parse()
            .map_err(|_| Interrupt::Invalid(format!("Invalid {what}: '{}'.", raw.trim())))
    }
}

fn split_skills(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|skill| !skill.is_empty())
        .map(str::to_string)
        .collect()
}
