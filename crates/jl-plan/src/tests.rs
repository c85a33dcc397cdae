//! Unit tests for jl-plan.

use jl_core::{
    AgeGroup, AlcoholPreference, BioProfile, CaffeinePreference, Chronotype, Direction, FlightSegment,
    Itinerary, LightSensitivity, MelatoninPreference, PlannerConfig,
};
use jl_core::time::add_minutes;
use jl_schedule::{EventType, Phase, Pipeline, Schedule, Timeline};

use crate::{Planner, PlannerBuilder};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn seg(id: &str, from: &str, to: &str, dep: &str, arr: &str) -> FlightSegment {
    FlightSegment::new(id, id.to_uppercase(), from, to, dep, arr)
}

/// JFK → LHR → SIN, 120-minute connection at LHR.
fn jfk_lhr_sin() -> Itinerary {
    Itinerary::new(vec![
        seg("a", "New York (JFK)", "London (LHR)", "2024-01-10T20:00", "2024-01-11T08:00"),
        seg("b", "London (LHR)", "Singapore (SIN)", "2024-01-11T10:00", "2024-01-12T06:00"),
    ])
}

/// SYD → LAX lands five clock-hours before it left.
fn westbound() -> Itinerary {
    Itinerary::new(vec![
        seg("a", "Sydney (SYD)", "Los Angeles (LAX)", "2024-01-10T11:00", "2024-01-10T06:00").with_duration("13h"),
    ])
}

/// Second leg leaves from a different airport than the first one lands at.
fn mismatched() -> Itinerary {
    Itinerary::new(vec![
        seg("a", "New York (JFK)", "London (LHR)", "2024-01-10T20:00", "2024-01-11T08:00").with_duration("7h"),
        seg("b", "Paris (CDG)", "Rome (FCO)", "2024-01-11T12:00", "2024-01-11T14:00").with_duration("2h"),
    ])
}

fn scenario_profile() -> BioProfile {
    BioProfile {
        age_group:         AgeGroup::Adult,
        chronotype:        Chronotype::Balanced,
        caffeine:          CaffeinePreference::Necessary,
        alcohol:           AlcoholPreference::None,
        melatonin:         MelatoninPreference::Natural,
        light_sensitivity: LightSensitivity::Normal,
    }
}

fn planner() -> Planner {
    PlannerBuilder::new().build().unwrap()
}

// ── End-to-end ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod end_to_end {
    use super::*;

    #[test]
    fn jfk_lhr_sin_scenario() {
        let outcome = planner().plan(&jfk_lhr_sin(), &scenario_profile()).unwrap();
        let plan = &outcome.plan;

        assert!(outcome.warnings.is_empty(), "codes match at LHR");
        assert_eq!(plan.direction, Direction::East);
        assert_eq!(plan.phase_shift.shift_minutes, 600);

        let transit: Vec<_> = plan.of_type(EventType::Transit).collect();
        assert_eq!(transit.len(), 1);
        assert_eq!(transit[0].phase, Phase::Flight);
        assert!(transit[0].title.starts_with("Long Layover in LHR"), "got {}", transit[0].title);

        assert_eq!(plan.titled("Strategic Caffeine").count(), 0);
        assert!(plan.titled("Morning Coffee").all(|c| c.event_type == EventType::Caffeine));

        let sleeps: Vec<_> = plan.of_type(EventType::Sleep).collect();
        assert!(!sleeps.is_empty());
        for sleep in sleeps {
            let snack_start = add_minutes(sleep.start, -30);
            assert!(
                plan.titled("Sleep-Inducing Snack")
                    .any(|s| s.phase == sleep.phase && s.start == snack_start),
                "no snack before {} at {}",
                sleep.title,
                sleep.time
            );
        }

        assert!(plan.recommended_names().all(|n| !n.contains("Melatonin")));
        assert!(plan.recommended_names().any(|n| n == "Compact Travel Pillow"));
    }

    #[test]
    fn time_labels_show_both_clocks() {
        let plan = planner().plan(&jfk_lhr_sin(), &scenario_profile()).unwrap().plan;
        assert!(!plan.schedule.is_empty());
        for event in &plan.schedule {
            assert!(event.time.contains("(JFK)") && event.time.contains("(SIN)"), "{}", event.time);
            assert_eq!(event.time, event.event.time(&plan.clocks));
        }
    }

    #[test]
    fn schedule_is_phase_ordered() {
        let plan = planner().plan(&jfk_lhr_sin(), &scenario_profile()).unwrap().plan;
        for pair in plan.schedule.windows(2) {
            assert!((pair[0].phase, pair[0].start) <= (pair[1].phase, pair[1].start));
        }
        assert!(plan.phase(Phase::Pre).count() > 0);
        assert!(plan.phase(Phase::Flight).count() > 0);
        assert!(plan.phase(Phase::Post).count() > 0);
    }

    #[test]
    fn identical_inputs_give_identical_plans() {
        let planner = planner();
        for profile in BioProfile::all().step_by(37) {
            let a = planner.plan(&jfk_lhr_sin(), &profile).unwrap();
            let b = planner.plan(&jfk_lhr_sin(), &profile).unwrap();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn caffeine_avoid_swaps_the_morning_coffee() {
        let planner = planner();
        let necessary = planner.plan(&jfk_lhr_sin(), &scenario_profile()).unwrap().plan;
        let coffees: Vec<_> = necessary.titled("Morning Coffee").map(|e| e.start).collect();
        assert!(!coffees.is_empty());

        let avoid = BioProfile { caffeine: CaffeinePreference::Avoid, ..scenario_profile() };
        let plan = planner.plan(&jfk_lhr_sin(), &avoid).unwrap().plan;
        assert_eq!(plan.of_type(EventType::Caffeine).count(), 0);
        let herbal: Vec<_> = plan.titled("Herbal Hydration").map(|e| e.start).collect();
        assert_eq!(herbal, coffees);
        assert_ne!(plan.schedule, necessary.schedule);
    }

    #[test]
    fn every_profile_stays_inside_its_phase() {
        let config = PlannerConfig::default();
        let planner = planner();
        for it in [jfk_lhr_sin(), westbound()] {
            let timeline = Timeline::resolve(&it, &config).unwrap();
            let cutoff = add_minutes(timeline.first_departure(), -config.airport_buffer_minutes);
            let arrival = timeline.final_arrival();
            for profile in BioProfile::all() {
                let plan = planner.plan(&it, &profile).unwrap().plan;
                for e in plan.phase(Phase::Pre) {
                    let last = e.end.unwrap_or(e.start);
                    assert!(last <= cutoff, "{profile:?}: {} runs to {last}", e.title);
                }
                for e in plan.phase(Phase::Post) {
                    assert!(e.start >= arrival, "{profile:?}: {} starts at {}", e.title, e.start);
                }
            }
        }
    }

    #[test]
    fn stacked_rules_keep_notes_short() {
        let stacked = BioProfile {
            age_group:  AgeGroup::Elder,
            chronotype: Chronotype::NightOwl,
            alcohol:    AlcoholPreference::Relax,
            caffeine:   CaffeinePreference::Avoid,
            ..scenario_profile()
        };
        let plan = planner().plan(&jfk_lhr_sin(), &stacked).unwrap().plan;
        for event in &plan.schedule {
            let note = event.science_note.as_deref().unwrap_or("");
            assert!(note.matches(". ").count() <= 1, "{}: {note}", event.title);
        }
        let sleep = plan
            .of_type(EventType::Sleep)
            .find(|e| e.description.contains("chronotype") && e.description.contains("alcohol"));
        assert!(sleep.is_some(), "adjustments are explained in the description");
    }

    #[test]
    fn recommendations_unique_for_every_profile() {
        let planner = planner();
        for profile in BioProfile::all() {
            let plan = planner.plan(&jfk_lhr_sin(), &profile).unwrap().plan;
            let mut seen = std::collections::HashSet::new();
            for rec in &plan.recommendations {
                for item in &rec.items {
                    assert!(seen.insert((rec.category.clone(), item.name.clone())), "{profile:?}");
                }
            }
        }
    }
}

// ── Planner ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod planner {
    use super::*;
    use crate::{PlanError, ScienceLink};
    use jl_schedule::ScheduleError;
    use jl_validate::Warning;

    #[test]
    fn warnings_ride_along_with_the_plan() {
        let outcome = planner().plan(&mismatched(), &BioProfile::default()).unwrap();
        assert_eq!(outcome.warnings.len(), 1);
        assert!(matches!(
            &outcome.warnings[0],
            Warning::LocationMismatch { arrives_at, departs_from, .. }
                if arrives_at == "LHR" && departs_from == "CDG"
        ));
        assert!(!outcome.plan.schedule.is_empty());
    }

    #[test]
    fn empty_itinerary_is_an_error() {
        let err = planner().plan(&Itinerary::default(), &BioProfile::default()).unwrap_err();
        assert!(matches!(err, PlanError::Schedule(ScheduleError::EmptyItinerary)));
    }

    #[test]
    fn unparsable_departure_is_an_error() {
        let it = Itinerary::new(vec![seg("a", "(JFK)", "(LHR)", "tomorrow evening", "2024-01-11T08:00")]);
        let err = planner().plan(&it, &BioProfile::default()).unwrap_err();
        assert!(matches!(err, PlanError::Schedule(ScheduleError::UnresolvedSegmentTiming { index: 0, .. })));
    }

    #[test]
    fn invalid_config_rejected_at_build() {
        let config = PlannerConfig { advance_step_minutes: 0, ..PlannerConfig::default() };
        let err = PlannerBuilder::new().config(config).build().err().unwrap();
        assert!(matches!(err, PlanError::Config(_)));
    }

    #[test]
    fn westbound_direction() {
        let plan = planner().plan(&westbound(), &BioProfile::default()).unwrap().plan;
        assert_eq!(plan.direction, Direction::West);
        assert_eq!(plan.phase_shift.shift_minutes, -300);
        assert_eq!(plan.clocks.origin, "SYD");
        assert_eq!(plan.clocks.destination, "LAX");
    }

    #[test]
    fn science_links_pass_through() {
        let link = ScienceLink::new(
            "Light and the circadian clock",
            "https://example.org/light",
            "Why morning light advances the clock.",
        );
        let planner = PlannerBuilder::new().science_link(link.clone()).build().unwrap();
        let plan = planner.plan(&westbound(), &BioProfile::default()).unwrap().plan;
        assert_eq!(plan.science_links, vec![link]);
    }

    #[test]
    fn empty_pipeline_leaves_base_schedule() {
        let config = PlannerConfig::default();
        let planner = PlannerBuilder::new().pipeline(Pipeline::new()).build().unwrap();
        let plan = planner.plan(&jfk_lhr_sin(), &scenario_profile()).unwrap().plan;

        let base = jl_schedule::build_itinerary(&jfk_lhr_sin(), &config).unwrap();
        assert_eq!(plan.schedule.len(), base.len());
        assert!(plan.recommendations.is_empty());
        assert_eq!(plan.titled("Sleep-Inducing Snack").count(), 0);
    }

    #[test]
    fn batch_keeps_input_order() {
        let planner = planner();
        let trips = vec![
            (jfk_lhr_sin(), scenario_profile()),
            (Itinerary::default(), BioProfile::default()),
            (westbound(), BioProfile::default()),
        ];
        let results = planner.plan_batch(&trips);
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].as_ref().unwrap().plan.direction, Direction::East);
        assert!(results[1].is_err());
        assert_eq!(results[2].as_ref().unwrap().plan.direction, Direction::West);

        let sequential = planner.plan(&trips[2].0, &trips[2].1).unwrap();
        assert_eq!(results[2].as_ref().unwrap(), &sequential);
    }
}

// ── Observer ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod observer {
    use super::*;
    use crate::{Plan, PlanObserver, TracingObserver};
    use jl_schedule::PhaseShift;
    use jl_validate::Warning;

    #[derive(Default)]
    struct Recorder {
        warnings: Option<usize>,
        shift: Option<PhaseShift>,
        stages: Vec<(&'static str, usize)>,
        final_events: Option<usize>,
    }

    impl PlanObserver for Recorder {
        fn on_validated(&mut self, warnings: &[Warning]) {
            self.warnings = Some(warnings.len());
        }

        fn on_classified(&mut self, shift: &PhaseShift) {
            self.shift = Some(*shift);
        }

        fn on_stage(&mut self, stage: &'static str, schedule: &Schedule) {
            self.stages.push((stage, schedule.len()));
        }

        fn on_plan(&mut self, plan: &Plan) {
            self.final_events = Some(plan.schedule.len());
        }
    }

    #[test]
    fn every_stage_reported_in_order() {
        let mut rec = Recorder::default();
        planner().plan_observed(&jfk_lhr_sin(), &scenario_profile(), &mut rec).unwrap();

        let names: Vec<_> = rec.stages.iter().map(|(n, _)| *n).collect();
        assert_eq!(
            names,
            ["builder", "age", "chronotype", "caffeine", "alcohol", "melatonin", "light", "transit"]
        );
        assert_eq!(rec.warnings, Some(0));
        assert_eq!(rec.shift.map(|s| s.shift_minutes), Some(600));
        assert_eq!(rec.final_events, rec.stages.last().map(|(_, n)| *n));
    }

    #[test]
    fn stages_never_drop_events() {
        let planner = planner();
        for profile in BioProfile::all().step_by(11) {
            let mut rec = Recorder::default();
            planner.plan_observed(&jfk_lhr_sin(), &profile, &mut rec).unwrap();
            for pair in rec.stages.windows(2) {
                assert!(pair[0].1 <= pair[1].1, "{} dropped events for {profile:?}", pair[1].0);
            }
        }
    }

    #[test]
    fn tracing_observer_does_not_change_the_plan() {
        let planner = planner();
        let plain = planner.plan(&jfk_lhr_sin(), &scenario_profile()).unwrap();
        let traced = planner.plan_observed(&jfk_lhr_sin(), &scenario_profile(), &mut TracingObserver).unwrap();
        assert_eq!(plain, traced);
    }
}

// ── Session gate ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod session {
    use std::sync::Arc;

    use jl_core::TicketId;

    use crate::SessionGate;

    #[test]
    fn newest_ticket_wins() {
        let gate = SessionGate::new();
        assert_eq!(gate.current(), TicketId(0));

        let first = gate.issue();
        let second = gate.issue();
        assert!(second > first);
        assert!(!gate.is_current(first));
        assert!(gate.is_current(second));

        assert_eq!(gate.accept(first, "stale"), None);
        assert_eq!(gate.accept(second, "fresh"), Some("fresh"));
    }

    #[test]
    fn cancel_invalidates_outstanding() {
        let gate = SessionGate::new();
        let ticket = gate.issue();
        gate.cancel();
        assert_eq!(gate.accept(ticket, 1), None);

        let next = gate.issue();
        assert_eq!(gate.accept(next, 2), Some(2));
    }

    #[test]
    fn tickets_unique_across_threads() {
        let gate = Arc::new(SessionGate::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let gate = Arc::clone(&gate);
                std::thread::spawn(move || (0..50).map(|_| gate.issue()).collect::<Vec<_>>())
            })
            .collect();

        let mut all: Vec<TicketId> = handles.into_iter().flat_map(|h| h.join().unwrap()).collect();
        all.sort();
        all.dedup();
        assert_eq!(all.len(), 400);
        assert_eq!(all.last().copied(), Some(gate.current()));
    }
}

// ── JSON ──────────────────────────────────────────────────────────────────────

#[cfg(all(test, feature = "serde"))]
mod json {
    use super::*;

    #[test]
    fn plan_serializes_with_camel_case_fields() {
        let outcome = planner().plan(&jfk_lhr_sin(), &scenario_profile()).unwrap();
        let value = serde_json::to_value(&outcome).unwrap();

        assert_eq!(value["warnings"], serde_json::json!([]));
        let plan = &value["plan"];
        assert_eq!(plan["direction"], "EAST");
        assert_eq!(plan["phaseShift"]["shiftMinutes"], 600);
        assert!(plan["scienceLinks"].as_array().unwrap().is_empty());

        let first = &plan["schedule"][0];
        assert!(first["time"].as_str().unwrap().contains("(JFK)"));
        assert!(first["type"].is_string());
        assert!(first["title"].is_string());

        let item = &plan["recommendations"][0]["items"][0];
        assert!(item["affiliatePlaceholder"].is_boolean());
    }

    #[test]
    fn identical_inputs_serialize_identically() {
        let planner = planner();
        for profile in BioProfile::all().step_by(23) {
            let a = serde_json::to_string(&planner.plan(&jfk_lhr_sin(), &profile).unwrap()).unwrap();
            let b = serde_json::to_string(&planner.plan(&jfk_lhr_sin(), &profile).unwrap()).unwrap();
            assert_eq!(a, b, "{profile:?}");
        }

        let trips: Vec<_> = BioProfile::all().take(12).map(|p| (westbound(), p)).collect();
        for ((it, profile), batched) in trips.iter().zip(planner.plan_batch(&trips)) {
            let sequential = serde_json::to_string(&planner.plan(it, profile).unwrap()).unwrap();
            assert_eq!(serde_json::to_string(&batched.unwrap()).unwrap(), sequential);
        }
    }

    #[test]
    fn plan_round_trips() {
        let plan = planner().plan(&westbound(), &BioProfile::default()).unwrap().plan;
        let text = serde_json::to_string(&plan).unwrap();
        let back: crate::Plan = serde_json::from_str(&text).unwrap();
        // Adaptation bookkeeping is not serialized.
        assert_eq!(back.schedule.len(), plan.schedule.len());
        assert_eq!(back.direction, plan.direction);
        assert_eq!(back.recommendations, plan.recommendations);
    }
}
