//! Export helpers for CSV and JSON artifacts.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Path that routes an artifact to stdout instead of a file.
pub const STDOUT_PATH: &str = "-";

/// Open a buffered sink for an artifact. Missing parent directories are created.
pub fn open_artifact(path: &Path) -> io::Result<Box<dyn Write>> {
    if path == Path::new(STDOUT_PATH) {
        return Ok(Box::new(BufWriter::new(io::stdout())));
    }
    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    log::debug!("writing artifact {}", path.display());
    Ok(Box::new(BufWriter::new(File::create(path)?)))
}

pub mod envelope {
    use std::io::{self, Write};

    use aero_performance::EnvelopePoint;

    const HEADER: &str = "index,speed_m_s,speed_kmh,load_factor";

    /// Write the V-n CSV header.
    pub fn write_header(writer: &mut dyn Write) -> io::Result<()> {
        writeln!(writer, "{}", HEADER)
    }

    /// One boundary point of the V-n diagram.
    #[derive(Debug, Clone, Copy)]
    pub struct Record {
        pub index: usize,
        pub point: EnvelopePoint,
    }

    impl Record {
        pub fn write_to(&self, writer: &mut dyn Write) -> io::Result<()> {
            writeln!(
                writer,
                "{},{:.4},{:.4},{:.4}",
                self.index,
                self.point.speed_m_s,
                aero_core::units::ms_to_kmh(self.point.speed_m_s),
                self.point.load_factor,
            )
        }
    }

    /// Header plus every point, in boundary order.
    pub fn write_all<I>(writer: &mut dyn Write, points: I) -> io::Result<usize>
    where
        I: IntoIterator<Item = EnvelopePoint>,
    {
        write_header(writer)?;
        let mut count = 0;
        for (index, point) in points.into_iter().enumerate() {
            Record { index, point }.write_to(writer)?;
            count += 1;
        }
        writer.flush()?;
        Ok(count)
    }
}

pub mod history {
    use std::io::{self, Write};

    use aero_optimizer::GenerationRecord;

    const HEADER: &str = "iteration,evaluations,best_fitness,mean_fitness,feasible_count";

    /// Write the optimizer history CSV header.
    pub fn write_header(writer: &mut dyn Write) -> io::Result<()> {
        writeln!(writer, "{}", HEADER)
    }

    /// Serialize one generation, matching the header ordering.
    pub fn write_record(writer: &mut dyn Write, record: &GenerationRecord) -> io::Result<()> {
        writeln!(
            writer,
            "{},{},{:.6},{:.6},{}",
            record.iteration,
            record.evaluations,
            record.best_fitness,
            record.mean_fitness,
            record.feasible_count,
        )
    }

    pub fn write_all(writer: &mut dyn Write, records: &[GenerationRecord]) -> io::Result<()> {
        write_header(writer)?;
        for record in records {
            write_record(writer, record)?;
        }
        writer.flush()
    }
}

pub mod feasibility {
    use std::io::{self, Write};

    use aero_feasibility::{FeasibilityReport, MetricAssessment};

    const HEADER: &str = "metric,value,unit,band,score,weight";

    pub fn write_header(writer: &mut dyn Write) -> io::Result<()> {
        writeln!(writer, "{}", HEADER)
    }

    /// One scored metric line; the unitless L/D leaves `unit` empty.
    pub fn write_record(writer: &mut dyn Write, line: &MetricAssessment) -> io::Result<()> {
        writeln!(
            writer,
            "{},{:.4},{},{},{:.1},{:.2}",
            line.metric.name(),
            line.value,
            line.unit,
            line.band.label(),
            line.score,
            line.weight,
        )
    }

    /// Metric table of a report followed by an `Overall` row carrying the weighted score.
    pub fn write_all(writer: &mut dyn Write, report: &FeasibilityReport) -> io::Result<()> {
        write_header(writer)?;
        for line in &report.metrics {
            write_record(writer, line)?;
        }
        writeln!(
            writer,
            "Overall,{:.4},,{},{:.1},1.00",
            report.score,
            report.overall.label(),
            report.score,
        )?;
        writer.flush()
    }
}

pub mod report {
    use std::io::{self, Write};
    use std::path::Path;

    use serde::Serialize;
    use serde_json::to_writer_pretty;

    /// Pretty-print any serializable report (metrics, feasibility, optimization summary).
    pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> io::Result<()> {
        let mut writer = super::open_artifact(path)?;
        to_writer_pretty(&mut writer, value)?;
        writeln!(writer)?;
        writer.flush()
    }
}
