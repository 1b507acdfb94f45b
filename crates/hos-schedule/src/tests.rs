//! Unit tests for hos-schedule.

use hos_core::Minutes;

use crate::counters::FUEL_TOLERANCE_MILES;
use crate::{
    compute_trip, compute_trip_segments, compute_trip_segments_with, DutyStatus, HosRules,
    OffDutyReason, OnDutyActivity, PickupLegPolicy, ScheduleError, Segment, SegmentKind,
    TripLegs, TripSchedule,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn statuses(schedule: &TripSchedule) -> Vec<DutyStatus> {
    schedule.segments.iter().map(Segment::status).collect()
}

fn durations(schedule: &TripSchedule) -> Vec<f64> {
    schedule.segments.iter().map(Segment::duration_hours).collect()
}

fn count(schedule: &TripSchedule, kind: SegmentKind) -> usize {
    schedule.segments.iter().filter(|s| s.kind == kind).count()
}

/// Replays a timeline and asserts every regulatory invariant.
fn assert_compliant(schedule: &TripSchedule, distance: f64, hours_used: f64) {
    let rules = HosRules::default();
    let segs = &schedule.segments;
    assert!(!segs.is_empty());

    // Contiguous timeline.
    assert_eq!(segs[0].start, Minutes::ZERO);
    for w in segs.windows(2) {
        assert_eq!(w[1].start, w[0].end(), "gap between {} and {}", w[0], w[1]);
    }

    let mut since_break = Minutes::ZERO;
    let mut daily_driving = Minutes::ZERO;
    let mut on_duty = Minutes::ZERO;
    let mut since_fuel = 0.0;
    let fuel_due = |miles: f64| rules.fuel_interval_miles - miles < FUEL_TOLERANCE_MILES;

    for (i, seg) in segs.iter().enumerate() {
        match seg.kind {
            SegmentKind::Driving { distance_miles } => {
                assert!(distance_miles > 0.0, "empty drive {seg}");
                since_break += seg.duration;
                daily_driving += seg.duration;
                on_duty += seg.duration;
                since_fuel += distance_miles;
                if fuel_due(since_fuel) {
                    assert_eq!(
                        segs.get(i + 1).map(|next| next.kind),
                        Some(SegmentKind::OnDuty(OnDutyActivity::FuelStop)),
                        "missed fuel stop after {seg}"
                    );
                }
            }
            SegmentKind::OnDuty(OnDutyActivity::FuelStop) => {
                assert!(fuel_due(since_fuel), "early fuel stop at {since_fuel} mi");
                since_fuel = 0.0;
                on_duty += seg.duration;
            }
            SegmentKind::OnDuty(_) => on_duty += seg.duration,
            SegmentKind::OffDuty(OffDutyReason::Break) => {
                assert_eq!(seg.duration, rules.break_duration);
                since_break = Minutes::ZERO;
                on_duty += seg.duration;
            }
            SegmentKind::OffDuty(OffDutyReason::CycleLimitReached { .. }) => {
                assert_eq!(seg.duration, Minutes::ZERO);
            }
            SegmentKind::Sleeper => {
                assert_eq!(seg.duration, rules.rest_duration);
                since_break = Minutes::ZERO;
                daily_driving = Minutes::ZERO;
                on_duty = Minutes::ZERO;
            }
        }
        assert!(since_break <= rules.break_after_driving, "8 h rule broken at {seg}");
        assert!(daily_driving <= rules.max_daily_driving, "11 h rule broken at {seg}");
        assert!(on_duty <= rules.duty_window, "14 h rule broken at {seg}");
        assert!(since_fuel < rules.fuel_interval_miles + 1.0, "fuel interval overrun at {seg}");
    }

    let used = Minutes::from_hours_f64(hours_used);
    if schedule.is_truncated() {
        assert!(segs.last().unwrap().is_cycle_limit_marker());
    } else {
        assert!((schedule.driven_miles() - distance).abs() < 0.5);
        assert!(schedule.cycle_consumed + used <= rules.cycle_limit);
        assert_eq!(
            segs.last().unwrap().kind,
            SegmentKind::OnDuty(OnDutyActivity::Dropoff)
        );
    }
}

// ── Reference scenarios ───────────────────────────────────────────────────────

#[cfg(test)]
mod scenarios {
    use super::*;

    #[test]
    fn short_trip_no_breaks() {
        let s = compute_trip_segments(300.0, 10.0).unwrap();
        assert_eq!(statuses(&s), [DutyStatus::OnDuty, DutyStatus::Driving, DutyStatus::OnDuty]);
        assert_eq!(s.total_hours(), 7.0);
        assert_eq!(s.cycle_hours_consumed(), 7.0);
        assert_eq!(s.segments[1].distance_miles(), 300.0);
    }

    #[test]
    fn medium_trip_takes_break_after_eight_hours() {
        let s = compute_trip_segments(600.0, 20.0).unwrap();
        assert_eq!(
            statuses(&s),
            [
                DutyStatus::OnDuty,
                DutyStatus::Driving,
                DutyStatus::OffDuty,
                DutyStatus::Driving,
                DutyStatus::OnDuty,
            ]
        );
        assert_eq!(durations(&s), [1.0, 8.0, 0.5, 2.0, 1.0]);
        // Breaks do not consume cycle time.
        assert_eq!(s.cycle_hours_consumed(), 12.0);
    }

    #[test]
    fn long_trip_has_one_sleeper() {
        let s = compute_trip_segments(1000.0, 0.0).unwrap();
        assert_eq!(count(&s, SegmentKind::Sleeper), 1);
        let sleeper = s.segments.iter().find(|seg| seg.status() == DutyStatus::Sleeper).unwrap();
        assert_eq!(sleeper.duration_hours(), 10.0);
        // 8 h drive, break, 3 h drive (11 h), rest, remaining 340 mi.
        let drives: Vec<f64> = s.segments.iter().filter(|seg| seg.is_driving()).map(Segment::duration_hours).collect();
        assert_eq!(drives.len(), 3);
        assert_eq!(drives[0], 8.0);
        assert_eq!(drives[1], 3.0);
        assert!((drives[2] - 340.0 / 60.0).abs() < 1e-9);
        // The 1000th mile lands on the destination: one fuel stop before dropoff.
        assert_eq!(count(&s, SegmentKind::OnDuty(OnDutyActivity::FuelStop)), 1);
        assert_compliant(&s, 1000.0, 0.0);
    }

    #[test]
    fn near_cycle_limit_truncates() {
        // 2 h left and the dropoff is owed: the pickup uses the only spare hour.
        let s = compute_trip_segments(300.0, 68.0).unwrap();
        assert!(s.is_truncated());
        assert_eq!(s.segments.len(), 2);
        assert_eq!(s.segments[0].kind, SegmentKind::OnDuty(OnDutyActivity::Pickup));
        let last = s.segments.last().unwrap();
        assert!(last.is_cycle_limit_marker());
        assert!(last.description().contains("LIMIT"));
        assert!(s.cycle_hours_consumed() <= 2.0);
    }

    #[test]
    fn zero_distance_is_pickup_and_dropoff() {
        let s = compute_trip_segments(0.0, 0.0).unwrap();
        assert_eq!(
            s.segments.iter().map(|seg| seg.kind).collect::<Vec<_>>(),
            [
                SegmentKind::OnDuty(OnDutyActivity::Pickup),
                SegmentKind::OnDuty(OnDutyActivity::Dropoff),
            ]
        );
        assert_eq!(s.total_hours(), 2.0);
        assert!(!s.is_truncated());
    }
}

// ── Invariants across many inputs ─────────────────────────────────────────────

#[cfg(test)]
mod properties {
    use super::*;

    #[test]
    fn every_schedule_is_compliant() {
        let distances = [0.0, 0.4, 1.0, 59.9, 299.5, 473.2, 480.0, 660.0, 999.9, 1000.0, 1234.56, 2500.0, 4000.0, 6789.0];
        let hours = [0.0, 5.25, 20.0, 45.0, 60.0, 65.5, 68.0, 69.0, 69.9];
        for &d in &distances {
            for &h in &hours {
                let s = compute_trip_segments(d, h)
                    .unwrap_or_else(|e| panic!("{d} mi / {h} h: {e}"));
                assert_compliant(&s, d, h);
            }
        }
    }

    #[test]
    fn fuel_stop_every_thousand_miles() {
        let s = compute_trip_segments(2500.0, 0.0).unwrap();
        assert_eq!(count(&s, SegmentKind::OnDuty(OnDutyActivity::FuelStop)), 2);
        assert_compliant(&s, 2500.0, 0.0);
    }

    #[test]
    fn fractional_distance_is_conserved_exactly() {
        let s = compute_trip_segments(473.2, 0.0).unwrap();
        assert!((s.driven_miles() - 473.2).abs() < 1e-9);
        // 473.2 min of driving rounds up to whole minutes.
        let drive = s.segments.iter().find(|seg| seg.is_driving()).unwrap();
        assert_eq!(drive.duration, Minutes(474));
    }

    #[test]
    fn fuel_stop_waits_for_the_full_interval() {
        let fuel_stop = SegmentKind::OnDuty(OnDutyActivity::FuelStop);
        for (miles, stops) in [(999.01, 0), (999.5, 0), (999.95, 1), (1000.0, 1)] {
            let s = compute_trip_segments(miles, 0.0).unwrap();
            assert_eq!(count(&s, fuel_stop), stops, "{miles} mi");
            assert_compliant(&s, miles, 0.0);
        }
    }

    #[test]
    fn fuel_interval_carries_across_legs() {
        // Leg 1 ends half a mile short of the interval; the stop comes early
        // in leg 2 rather than at the pickup.
        let legs = TripLegs { to_pickup: 999.5, to_dropoff: 100.0 };
        let s = compute_trip(legs, 0.0, &HosRules::default(), PickupLegPolicy::DriveToPickup).unwrap();
        assert!(!s.is_truncated());
        assert_eq!(count(&s, SegmentKind::OnDuty(OnDutyActivity::FuelStop)), 1);

        let pickup = s.segments.iter().position(|seg| seg.kind == SegmentKind::OnDuty(OnDutyActivity::Pickup)).unwrap();
        let fuel = s.segments.iter().position(|seg| seg.kind == SegmentKind::OnDuty(OnDutyActivity::FuelStop)).unwrap();
        assert!(fuel > pickup);
        let before_fuel: f64 = s.segments[..fuel].iter().map(Segment::distance_miles).sum();
        assert!(before_fuel >= 999.9 && before_fuel < 1001.0, "{before_fuel}");
        assert!((s.driven_miles() - 1099.5).abs() < 1e-9);
    }

    #[test]
    fn long_trip_sleeps_daily() {
        let s = compute_trip_segments(3500.0, 0.0).unwrap();
        // 3500 min of driving at 660 per day → five sleeper rests.
        assert_eq!(count(&s, SegmentKind::Sleeper), 5);
        assert_eq!(count(&s, SegmentKind::OnDuty(OnDutyActivity::FuelStop)), 3);
        assert!(!s.is_truncated());
    }
}

// ── Cycle accounting ──────────────────────────────────────────────────────────

#[cfg(test)]
mod cycle {
    use super::*;

    #[test]
    fn completes_exactly_at_the_limit() {
        // 10 h left: pickup 1 + drive 8 + dropoff 1.
        let s = compute_trip_segments(480.0, 60.0).unwrap();
        assert!(!s.is_truncated());
        assert_eq!(s.cycle_consumed, Minutes::hours(10));
    }

    #[test]
    fn reserves_time_for_dropoff() {
        // 540 mi needs 9 h of driving; only 8 h remain once pickup and
        // dropoff are charged.
        let s = compute_trip_segments(540.0, 60.0).unwrap();
        assert!(s.is_truncated());
        assert_eq!(s.driven_miles(), 480.0);
        assert_eq!(s.cycle_consumed, Minutes::hours(9));
        assert_compliant(&s, 540.0, 60.0);
    }

    #[test]
    fn pickup_alone_exceeding_cycle_truncates() {
        let s = compute_trip_segments(0.0, 69.5).unwrap();
        assert_eq!(s.segments.len(), 2);
        assert_eq!(s.segments[0].kind, SegmentKind::OnDuty(OnDutyActivity::Pickup));
        assert!(s.segments[1].is_cycle_limit_marker());
    }

    #[test]
    fn sub_minute_cycle_remainder_is_accepted() {
        let s = compute_trip_segments(0.0, 69.995).unwrap();
        assert!(s.is_truncated());
        assert_eq!(s.segments[0].kind, SegmentKind::OnDuty(OnDutyActivity::Pickup));
        assert!(s.segments[1].is_cycle_limit_marker());
    }

    #[test]
    fn sleeper_and_break_do_not_consume_cycle() {
        let s = compute_trip_segments(1000.0, 0.0).unwrap();
        let on_duty_and_driving: Minutes = s
            .segments
            .iter()
            .filter(|seg| matches!(seg.status(), DutyStatus::Driving | DutyStatus::OnDuty))
            .map(|seg| seg.duration)
            .sum();
        assert_eq!(s.cycle_consumed, on_duty_and_driving);
    }

    #[test]
    fn marker_description_names_the_limit() {
        let s = compute_trip_segments(900.0, 66.0).unwrap();
        let last = s.segments.last().unwrap();
        assert_eq!(last.description(), "REACHED 70-HOUR LIMIT");
        assert_eq!(last.duration, Minutes::ZERO);
    }
}

// ── Input validation ──────────────────────────────────────────────────────────

#[cfg(test)]
mod validation {
    use super::*;

    #[test]
    fn no_cycle_hours_left() {
        assert!(matches!(
            compute_trip_segments(100.0, 70.0),
            Err(ScheduleError::NoCycleHoursAvailable { .. })
        ));
        assert!(matches!(
            compute_trip_segments(100.0, 82.0),
            Err(ScheduleError::NoCycleHoursAvailable { .. })
        ));
    }

    #[test]
    fn negative_or_nan_inputs_rejected() {
        assert!(matches!(compute_trip_segments(-1.0, 0.0), Err(ScheduleError::InvalidInput(_))));
        assert!(matches!(compute_trip_segments(f64::NAN, 0.0), Err(ScheduleError::InvalidInput(_))));
        assert!(matches!(compute_trip_segments(10.0, -0.5), Err(ScheduleError::InvalidInput(_))));
        assert!(matches!(
            compute_trip_segments(f64::INFINITY, 0.0),
            Err(ScheduleError::InvalidInput(_))
        ));
    }

    #[test]
    fn invalid_rules_rejected() {
        let rules = HosRules { avg_speed_mph: 0.0, ..HosRules::default() };
        assert!(matches!(
            compute_trip_segments_with(100.0, 0.0, &rules),
            Err(ScheduleError::InvalidRules(_))
        ));
        let rules = HosRules { break_after_driving: Minutes::ZERO, ..HosRules::default() };
        assert!(matches!(rules.validate(), Err(ScheduleError::InvalidRules(_))));
    }
}

// ── Rules ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod rules {
    use super::*;

    #[test]
    fn minutes_for_miles_rounds_up() {
        let rules = HosRules::default();
        assert_eq!(rules.minutes_for_miles(300.0), Minutes(300));
        assert_eq!(rules.minutes_for_miles(300.2), Minutes(301));
        assert_eq!(rules.minutes_for_miles(0.0), Minutes::ZERO);
        assert_eq!(rules.minutes_for_miles(1e-9), Minutes(1));
    }

    #[test]
    fn slower_speed_stretches_driving() {
        let rules = HosRules { avg_speed_mph: 50.0, ..HosRules::default() };
        assert_eq!(rules.minutes_for_miles(100.0), Minutes(120));
        assert_eq!(rules.minutes_for_miles(rules.fuel_interval_miles), Minutes(1200));
        let s = compute_trip_segments_with(100.0, 0.0, &rules).unwrap();
        assert_eq!(s.total_hours(), 4.0);
    }

    #[test]
    fn available_cycle() {
        let rules = HosRules::default();
        assert_eq!(rules.available_cycle(10.0).unwrap(), Minutes::hours(60));
        assert_eq!(rules.available_cycle(69.5).unwrap(), Minutes(30));
        assert_eq!(rules.available_cycle(69.995).unwrap(), Minutes(1));
        assert!(matches!(
            rules.available_cycle(70.0),
            Err(ScheduleError::NoCycleHoursAvailable { .. })
        ));
        assert!(rules.available_cycle(f64::NAN).is_err());
    }

    #[test]
    fn partial_config_keeps_defaults() {
        let rules: HosRules = serde_json::from_str(r#"{ "avg_speed_mph": 55.0, "cycle_limit": 3600 }"#).unwrap();
        assert_eq!(rules.avg_speed_mph, 55.0);
        assert_eq!(rules.cycle_limit, Minutes::hours(60));
        assert_eq!(rules.max_daily_driving, Minutes::hours(11));
    }

    #[test]
    fn policy_names() {
        let p: PickupLegPolicy = serde_json::from_str(r#""drive_to_pickup""#).unwrap();
        assert_eq!(p, PickupLegPolicy::DriveToPickup);
        assert_eq!(PickupLegPolicy::default(), PickupLegPolicy::FoldIntoTrip);
    }
}

// ── Transition logic ──────────────────────────────────────────────────────────

#[cfg(test)]
mod transitions {
    use super::*;
    use crate::{next_action, Action, TimeToLimits, TripCounters};

    fn budget() -> Minutes {
        Minutes::hours(69)
    }

    #[test]
    fn drive_is_bounded_by_tightest_limit() {
        let rules = HosRules::default();
        let c = TripCounters::new().with_remaining(1000.0);
        assert_eq!(next_action(&c, &rules, budget()), Action::Drive(Minutes::hours(8)));

        let c = TripCounters { driving_daily: Minutes::hours(10), ..c };
        assert_eq!(next_action(&c, &rules, budget()), Action::Drive(Minutes::hours(1)));
    }

    #[test]
    fn sleeper_outranks_break() {
        let rules = HosRules::default();
        let c = TripCounters {
            driving_since_break: Minutes::hours(8),
            driving_daily: Minutes::hours(11),
            ..TripCounters::new().with_remaining(50.0)
        };
        assert_eq!(next_action(&c, &rules, budget()), Action::Sleep);

        let c = TripCounters { driving_daily: Minutes::hours(8), ..c };
        assert_eq!(next_action(&c, &rules, budget()), Action::Break);
    }

    #[test]
    fn duty_window_forces_sleep() {
        let rules = HosRules::default();
        let c = TripCounters {
            on_duty_daily: Minutes::hours(14),
            ..TripCounters::new().with_remaining(50.0)
        };
        assert_eq!(next_action(&c, &rules, budget()), Action::Sleep);
    }

    #[test]
    fn cycle_outranks_everything() {
        let rules = HosRules::default();
        let c = TripCounters {
            driving_daily: Minutes::hours(11),
            cycle_consumed: budget(),
            ..TripCounters::new().with_remaining(50.0)
        };
        assert_eq!(next_action(&c, &rules, budget()), Action::CycleLimit);
    }

    #[test]
    fn unresolvable_state_reports_stall() {
        // An overdue fuel stop is not a limit the decision step resolves.
        let rules = HosRules::default();
        let c = TripCounters {
            miles_since_fuel: rules.fuel_interval_miles,
            ..TripCounters::new().with_remaining(50.0)
        };
        assert_eq!(next_action(&c, &rules, budget()), Action::Stall);
    }

    #[test]
    fn transitions_update_counters() {
        let c = TripCounters::new()
            .with_remaining(200.0)
            .after_on_duty(Minutes(60))
            .after_drive(Minutes(120), 120.0);
        assert_eq!(c.remaining_miles, 80.0);
        assert_eq!(c.current_time, Minutes(180));
        assert_eq!(c.on_duty_daily, Minutes(180));
        assert_eq!(c.cycle_consumed, Minutes(180));
        assert_eq!(c.miles_since_fuel, 120.0);

        let c = c.after_break(Minutes(30));
        assert_eq!(c.driving_since_break, Minutes::ZERO);
        assert_eq!(c.on_duty_daily, Minutes(210));
        assert_eq!(c.cycle_consumed, Minutes(180));

        let c = c.after_sleeper(Minutes(600));
        assert_eq!(c.current_time, Minutes(810));
        assert_eq!(c.driving_daily, Minutes::ZERO);
        assert_eq!(c.on_duty_daily, Minutes::ZERO);
        assert_eq!(c.miles_since_fuel, 120.0);

        let c = c.after_fuel_stop(Minutes(30));
        assert_eq!(c.miles_since_fuel, 0.0);
        assert_eq!(c.cycle_consumed, Minutes(210));
    }

    #[test]
    fn limits_min() {
        let limits = TimeToLimits {
            finish: Minutes(500),
            break_due: Minutes(480),
            daily_driving: Minutes(660),
            duty_window: Minutes(90),
            fuel: Minutes(1000),
            cycle: Minutes(4000),
        };
        assert_eq!(limits.min(), Minutes(90));
    }
}

// ── Pickup leg policy ─────────────────────────────────────────────────────────

#[cfg(test)]
mod pickup_policy {
    use super::*;

    #[test]
    fn fold_into_trip_drives_both_legs_after_pickup() {
        let legs = TripLegs { to_pickup: 200.0, to_dropoff: 100.0 };
        let s = compute_trip(legs, 10.0, &HosRules::default(), PickupLegPolicy::FoldIntoTrip).unwrap();
        let folded = compute_trip_segments(300.0, 10.0).unwrap();
        assert_eq!(s.segments, folded.segments);
    }

    #[test]
    fn drive_to_pickup_logs_empty_leg_first() {
        let legs = TripLegs { to_pickup: 200.0, to_dropoff: 300.0 };
        let s = compute_trip(legs, 0.0, &HosRules::default(), PickupLegPolicy::DriveToPickup).unwrap();
        let kinds: Vec<SegmentKind> = s.segments.iter().map(|seg| seg.kind).collect();
        assert_eq!(
            kinds,
            [
                SegmentKind::Driving { distance_miles: 200.0 },
                SegmentKind::OnDuty(OnDutyActivity::Pickup),
                SegmentKind::Driving { distance_miles: 280.0 },
                SegmentKind::OffDuty(OffDutyReason::Break),
                SegmentKind::Driving { distance_miles: 20.0 },
                SegmentKind::OnDuty(OnDutyActivity::Dropoff),
            ]
        );
        assert_eq!(s.segments[1].start, Minutes(200));
        assert_compliant(&s, 500.0, 0.0);
    }

    #[test]
    fn drive_to_pickup_reserves_pickup_and_dropoff() {
        // 3 h left: the empty leg may use only 1 h.
        let legs = TripLegs { to_pickup: 120.0, to_dropoff: 60.0 };
        let s = compute_trip(legs, 67.0, &HosRules::default(), PickupLegPolicy::DriveToPickup).unwrap();
        assert!(s.is_truncated());
        assert_eq!(s.driven_miles(), 60.0);
        assert_eq!(s.segments.len(), 2);
    }
}

// ── Segment presentation ──────────────────────────────────────────────────────

#[cfg(test)]
mod segment {
    use super::*;

    #[test]
    fn descriptions() {
        let s = compute_trip_segments(1000.0, 0.0).unwrap();
        let labels: Vec<String> = s.segments.iter().map(Segment::description).collect();
        assert_eq!(labels[0], "Pickup at Origin");
        assert_eq!(labels[1], "Driving 480.0 miles");
        assert_eq!(labels[2], "30-minute Mandatory Break");
        assert!(labels.contains(&"10-hour Mandatory Rest".to_owned()));
        assert!(labels.contains(&"Fuel Stop".to_owned()));
        assert_eq!(labels.last().unwrap(), "Dropoff at Destination");
    }

    #[test]
    fn record_shape() {
        let s = compute_trip_segments(300.0, 0.0).unwrap();
        let rec = s.segments[1].to_record();
        assert_eq!(rec.kind, DutyStatus::Driving);
        assert_eq!(rec.start_time, 1.0);
        assert_eq!(rec.duration, 5.0);
        assert_eq!(rec.distance_miles, 300.0);
        assert_eq!(rec.latitude, None);

        let json = serde_json::to_value(&rec).unwrap();
        assert_eq!(json["type"], "driving");
        assert_eq!(json["status"], "driving");
        assert_eq!(json["description"], "Driving 300.0 miles");
    }

    #[test]
    fn display() {
        let s = compute_trip_segments(300.0, 0.0).unwrap();
        assert_eq!(s.segments[0].to_string(), "0:00-1:00 on_duty  Pickup at Origin");
    }
}
