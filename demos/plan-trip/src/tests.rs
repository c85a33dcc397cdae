//! Unit tests for the plan-trip demo.

use std::cell::{Cell, RefCell};
use std::io::{self, Write};
use std::rc::Rc;

use jl_core::{BioProfile, CaffeinePreference, FlightSegment, Itinerary, LightSensitivity};
use jl_plan::{Plan, PlannerBuilder};

use crate::export::{
    CsvExport, ExportObserver, RECOMMENDATIONS_FILE, RECOMMENDATIONS_HEADER, SCHEDULE_FILE, SCHEDULE_HEADER,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn itinerary() -> Itinerary {
    Itinerary::new(vec![
        FlightSegment::new("a", "BA178", "New York (JFK)", "London (LHR)", "2024-01-10T20:00", "2024-01-11T08:00"),
        FlightSegment::new("b", "SQ317", "London (LHR)", "Singapore (SIN)", "2024-01-11T10:00", "2024-01-12T06:00"),
    ])
}

fn profile() -> BioProfile {
    BioProfile {
        caffeine: CaffeinePreference::Optimized,
        light_sensitivity: LightSensitivity::High,
        ..BioProfile::default()
    }
}

fn plan() -> Plan {
    PlannerBuilder::new().build().unwrap().plan(&itinerary(), &profile()).unwrap().plan
}

fn records(path: &std::path::Path) -> Vec<csv::StringRecord> {
    let mut rdr = csv::Reader::from_path(path).unwrap();
    rdr.records().map(|r| r.unwrap()).collect()
}

/// An in-memory sink whose next `failures` writes fail.
#[derive(Clone, Default)]
struct FlakySink {
    failures: Rc<Cell<usize>>,
    written:  Rc<RefCell<Vec<u8>>>,
}

impl Write for FlakySink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.failures.get() > 0 {
            self.failures.set(self.failures.get() - 1);
            return Err(io::Error::other("disk full"));
        }
        self.written.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

// ── Arguments ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod args {
    use clap::Parser;

    use crate::Args;

    #[test]
    fn itinerary_and_options() {
        let args = Args::try_parse_from([
            "plan-trip",
            "trip.json",
            "--profile",
            "me.json",
            "--config",
            "planner.toml",
            "--out",
            "plan",
        ])
        .unwrap();
        assert_eq!(args.itinerary.to_str(), Some("trip.json"));
        assert_eq!(args.profile.as_deref().and_then(|p| p.to_str()), Some("me.json"));
        assert_eq!(args.config.as_deref().and_then(|p| p.to_str()), Some("planner.toml"));
        assert_eq!(args.out.as_deref().and_then(|p| p.to_str()), Some("plan"));
        assert!(!args.sweep);
    }

    #[test]
    fn itinerary_is_required() {
        assert!(Args::try_parse_from(["plan-trip", "--sweep"]).is_err());
    }

    #[test]
    fn unknown_flag_is_rejected() {
        assert!(Args::try_parse_from(["plan-trip", "trip.json", "--verbose"]).is_err());
    }

    #[test]
    fn sweep_and_out_conflict() {
        assert!(Args::try_parse_from(["plan-trip", "trip.json", "--sweep"]).unwrap().sweep);
        assert!(Args::try_parse_from(["plan-trip", "trip.json", "--sweep", "--out", "plan"]).is_err());
    }
}

// ── CSV export ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod export {
    use super::*;

    #[test]
    fn files_created_with_headers() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("exports").join("trip");
        CsvExport::create(&nested).unwrap().finish().unwrap();

        let headers = |name: &str| -> Vec<String> {
            let mut rdr = csv::Reader::from_path(nested.join(name)).unwrap();
            rdr.headers().unwrap().iter().map(str::to_owned).collect()
        };
        assert_eq!(headers(SCHEDULE_FILE), SCHEDULE_HEADER);
        assert_eq!(headers(RECOMMENDATIONS_FILE), RECOMMENDATIONS_HEADER);
    }

    #[test]
    fn one_row_per_event_and_item() {
        let dir = tempfile::tempdir().unwrap();
        let plan = plan();
        CsvExport::create(dir.path()).unwrap().write_plan(&plan).unwrap();

        let schedule = records(&dir.path().join(SCHEDULE_FILE));
        assert_eq!(schedule.len(), plan.schedule.len());
        assert_eq!(&schedule[0][0], "PRE");
        assert_eq!(&schedule[0][5], plan.schedule[0].title.as_str());
        let wake = schedule.iter().position(|r| r[3].is_empty()).unwrap();
        assert!(plan.schedule[wake].end.is_none());

        let transit: Vec<_> = schedule.iter().filter(|r| &r[1] == "TRANSIT").collect();
        assert_eq!(transit.len(), 1);
        assert!(transit[0][5].starts_with("Long Layover in LHR"));
        assert!(transit[0][8].contains("; "));

        let recs = records(&dir.path().join(RECOMMENDATIONS_FILE));
        let total: usize = plan.recommendations.iter().map(|r| r.items.len()).sum();
        assert_eq!(recs.len(), total);
        assert!(recs.iter().any(|r| &r[1] == "Blue-Blocker Glasses"));
        assert!(recs.iter().all(|r| &r[3] == "0" || &r[3] == "1"));
    }

    #[test]
    fn failed_flush_is_reported_until_it_succeeds() {
        let sink = FlakySink::default();
        let mut export = CsvExport::from_writers(sink.clone(), FlakySink::default()).unwrap();

        sink.failures.set(usize::MAX);
        assert!(export.finish().is_err());
        assert!(export.finish().is_err());
        assert!(sink.written.borrow().is_empty());

        sink.failures.set(0);
        export.finish().unwrap();
        let written = String::from_utf8(sink.written.borrow().clone()).unwrap();
        assert!(written.starts_with("phase,type,start"));

        // Flushed once: nothing left to do.
        sink.failures.set(usize::MAX);
        export.finish().unwrap();
    }

    #[test]
    fn observer_exports_during_planning() {
        let dir = tempfile::tempdir().unwrap();
        let planner = PlannerBuilder::new().build().unwrap();
        let mut observer = ExportObserver::new(CsvExport::create(dir.path()).unwrap());

        let outcome = planner.plan_observed(&itinerary(), &profile(), &mut observer).unwrap();
        assert!(observer.take_error().is_none());
        assert_eq!(records(&dir.path().join(SCHEDULE_FILE)).len(), outcome.plan.schedule.len());
    }

    #[test]
    fn observer_keeps_the_write_error() {
        let sink = FlakySink::default();
        sink.failures.set(usize::MAX);
        let mut observer = ExportObserver::new(CsvExport::from_writers(sink.clone(), sink).unwrap());

        let planner = PlannerBuilder::new().build().unwrap();
        assert!(planner.plan_observed(&itinerary(), &profile(), &mut observer).is_ok());
        assert!(observer.take_error().is_some());
        assert!(observer.take_error().is_none());
    }
}
