//! The departure registry.
//!
//! Holds every departure on the board, sorted by scheduled time, together
//! with the simulated clock. All mutation goes through here so that train
//! numbers stay unique, the list stays sorted and the clock never runs
//! backwards.
//!
//! The board is small, so lookups are linear scans over a `Vec`.

use tracing::{debug, info};

use crate::domain::{ClockTime, Delay, Departure, RegistryError, Track, TrainNumber};

/// In-memory departure board with a simulated clock.
#[derive(Debug, Clone, Default)]
pub struct DepartureRegistry {
    /// Sorted ascending by scheduled departure time.
    departures: Vec<Departure>,
    current_time: ClockTime,
}

impl DepartureRegistry {
    /// An empty board with the clock at midnight.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a board from a batch of departures.
    ///
    /// Fails on the first duplicate train number, in which case nothing is
    /// returned.
    pub fn with_departures(
        departures: impl IntoIterator<Item = Departure>,
    ) -> Result<Self, RegistryError> {
        let mut registry = Self::new();
        for departure in departures {
            registry.add(departure)?;
        }
        Ok(registry)
    }

    /// The simulated current time.
    pub fn current_time(&self) -> ClockTime {
        self.current_time
    }

    pub fn len(&self) -> usize {
        self.departures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.departures.is_empty()
    }

    /// Add a departure, keeping the board sorted by scheduled time.
    ///
    /// Departures with the same scheduled time keep the order they were added
    /// in.
    pub fn add(&mut self, departure: Departure) -> Result<(), RegistryError> {
        if self.position(departure.train_number()).is_some() {
            return Err(RegistryError::DuplicateTrainNumber(
                departure.train_number().clone(),
            ));
        }

        debug!(
            train = %departure.train_number(),
            time = %departure.departure_time(),
            destination = departure.destination(),
            "Departure added"
        );

        self.departures.push(departure);
        self.departures.sort_by_key(Departure::departure_time);
        Ok(())
    }

    /// Assign (or clear, with [`Track::Unassigned`]) the track of a departure.
    pub fn assign_track(
        &mut self,
        train_number: &TrainNumber,
        track: Track,
    ) -> Result<(), RegistryError> {
        let departure = self.get_mut(train_number)?;
        departure.set_track(track);
        debug!(train = %train_number, %track, "Track assigned");
        Ok(())
    }

    /// Register a delay, replacing any delay registered before.
    pub fn register_delay(
        &mut self,
        train_number: &TrainNumber,
        delay: Delay,
    ) -> Result<(), RegistryError> {
        let departure = self.get_mut(train_number)?;
        departure.set_delay(delay);
        debug!(train = %train_number, %delay, "Delay registered");
        Ok(())
    }

    /// Look up a departure by train number.
    pub fn find_by_train_number(&self, train_number: &TrainNumber) -> Option<&Departure> {
        self.departures
            .iter()
            .find(|d| d.train_number() == train_number)
    }

    /// All departures to `destination`, ignoring case, in time order.
    pub fn find_by_destination(&self, destination: &str) -> Vec<&Departure> {
        self.departures
            .iter()
            .filter(|d| d.goes_to(destination))
            .collect()
    }

    /// Move the clock to `new_time`.
    ///
    /// Setting the clock to its current reading is allowed; setting it
    /// earlier is rejected and leaves the clock alone. Only the time of day
    /// is compared.
    pub fn set_current_time(&mut self, new_time: ClockTime) -> Result<(), RegistryError> {
        if new_time < self.current_time {
            return Err(RegistryError::TimeGoesBackwards {
                current: self.current_time,
                requested: new_time,
            });
        }

        info!(from = %self.current_time, to = %new_time, "Clock updated");
        self.current_time = new_time;
        Ok(())
    }

    /// Remove every departure whose effective time (scheduled time plus
    /// delay, wrapped within the day) is strictly before `cutoff`.
    pub fn purge_before(&mut self, cutoff: ClockTime) {
        let before = self.departures.len();
        self.departures.retain(|d| d.effective_time() >= cutoff);
        let removed = before - self.departures.len();

        info!(
            %cutoff,
            removed,
            remaining = self.departures.len(),
            "Purged departed trains"
        );
    }

    /// The operator's clock update: move the clock, then drop every
    /// departure that has already left.
    ///
    /// Nothing is purged if the clock update is rejected.
    pub fn advance_clock(&mut self, new_time: ClockTime) -> Result<(), RegistryError> {
        self.set_current_time(new_time)?;
        self.purge_before(new_time);
        Ok(())
    }

    /// Every departure, in scheduled time order.
    pub fn list_all(&self) -> &[Departure] {
        &self.departures
    }

    /// Departures scheduled strictly after `time`, in scheduled time order.
    pub fn list_after(&self, time: ClockTime) -> Vec<&Departure> {
        let mut after: Vec<&Departure> = self
            .departures
            .iter()
            .filter(|d| d.departure_time() > time)
            .collect();
        after.sort_by_key(|d| d.departure_time());
        after
    }

    /// Departures scheduled after the current clock reading.
    pub fn upcoming(&self) -> Vec<&Departure> {
        self.list_after(self.current_time)
    }

    fn position(&self, train_number: &TrainNumber) -> Option<usize> {
        self.departures
            .iter()
            .position(|d| d.train_number() == train_number)
    }

    fn get_mut(&mut self, train_number: &TrainNumber) -> Result<&mut Departure, RegistryError> {
        self.departures
            .iter_mut()
            .find(|d| d.train_number() == train_number)
            .ok_or_else(|| RegistryError::NotFound(train_number.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn time(s: &str) -> ClockTime {
        ClockTime::parse_hhmm(s).unwrap()
    }

    fn number(s: &str) -> TrainNumber {
        s.parse().unwrap()
    }

    fn make_departure(
        departure_time: &str,
        line: &str,
        train_number: &str,
        destination: &str,
        track: i32,
    ) -> Departure {
        Departure::new(
            time(departure_time),
            line,
            number(train_number),
            destination,
            Track::from_number(track).unwrap(),
        )
    }

    /// The three-departure board used by the purge scenario.
    fn scenario_board() -> DepartureRegistry {
        DepartureRegistry::with_departures([
            make_departure("08:30", "L1", "1001", "Oslo", 1),
            make_departure("09:45", "L2", "1002", "Bergen", 2),
            make_departure("10:15", "L3", "1003", "Trondheim", -1),
        ])
        .unwrap()
    }

    fn numbers(departures: &[&Departure]) -> Vec<String> {
        departures
            .iter()
            .map(|d| d.train_number().to_string())
            .collect()
    }

    fn all_numbers(registry: &DepartureRegistry) -> Vec<String> {
        numbers(&registry.list_all().iter().collect::<Vec<_>>())
    }

    #[test]
    fn new_board_is_empty_at_midnight() {
        let registry = DepartureRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
        assert_eq!(registry.current_time(), ClockTime::midnight());
    }

    #[test]
    fn add_keeps_time_order() {
        let mut registry = DepartureRegistry::new();
        registry
            .add(make_departure("12:30", "L2", "1005", "Bergen", -1))
            .unwrap();
        registry
            .add(make_departure("08:30", "L1", "1001", "Oslo", 1))
            .unwrap();
        registry
            .add(make_departure("10:15", "L3", "1003", "Trondheim", -1))
            .unwrap();

        assert_eq!(all_numbers(&registry), ["1001", "1003", "1005"]);
    }

    #[test]
    fn add_equal_times_keep_insertion_order() {
        let mut registry = DepartureRegistry::new();
        registry
            .add(make_departure("09:00", "L1", "B", "Oslo", 1))
            .unwrap();
        registry
            .add(make_departure("09:00", "L2", "A", "Bergen", 2))
            .unwrap();

        assert_eq!(all_numbers(&registry), ["B", "A"]);
    }

    #[test]
    fn duplicate_train_number_rejected() {
        let mut registry = DepartureRegistry::new();
        registry
            .add(make_departure("08:30", "L1", "1001", "Oslo", 1))
            .unwrap();

        let err = registry
            .add(make_departure("07:00", "L9", "1001", "Bodø", -1))
            .unwrap_err();

        assert_eq!(err, RegistryError::DuplicateTrainNumber(number("1001")));
        assert_eq!(registry.len(), 1);
        let kept = registry.find_by_train_number(&number("1001")).unwrap();
        assert_eq!(kept.destination(), "Oslo");
        assert_eq!(kept.departure_time(), time("08:30"));
    }

    #[test]
    fn with_departures_rejects_duplicates() {
        let result = DepartureRegistry::with_departures([
            make_departure("08:30", "L1", "1001", "Oslo", 1),
            make_departure("09:30", "L1", "1001", "Oslo", 1),
        ]);
        assert!(matches!(
            result,
            Err(RegistryError::DuplicateTrainNumber(_))
        ));
    }

    #[test]
    fn assign_track() {
        let mut registry = scenario_board();

        registry
            .assign_track(&number("1003"), Track::from_number(5).unwrap())
            .unwrap();
        assert_eq!(
            registry.find_by_train_number(&number("1003")).unwrap().track(),
            Track::from_number(5).unwrap()
        );

        registry
            .assign_track(&number("1003"), Track::Unassigned)
            .unwrap();
        assert_eq!(
            registry.find_by_train_number(&number("1003")).unwrap().track(),
            Track::Unassigned
        );
    }

    #[test]
    fn assign_track_unknown_train() {
        let mut registry = scenario_board();
        let before = registry.list_all().to_vec();

        let err = registry
            .assign_track(&number("9999"), Track::from_number(1).unwrap())
            .unwrap_err();

        assert_eq!(err, RegistryError::NotFound(number("9999")));
        assert_eq!(registry.list_all(), before.as_slice());
    }

    #[test]
    fn register_delay_overwrites() {
        let mut registry = scenario_board();

        registry
            .register_delay(&number("1002"), Delay::from_minutes(30))
            .unwrap();
        registry
            .register_delay(&number("1002"), Delay::from_minutes(5))
            .unwrap();

        let d = registry.find_by_train_number(&number("1002")).unwrap();
        assert_eq!(d.delay(), Delay::from_minutes(5));
        // Delay does not move the departure in the list
        assert_eq!(all_numbers(&registry), ["1001", "1002", "1003"]);
    }

    #[test]
    fn register_delay_unknown_train() {
        let mut registry = scenario_board();
        let err = registry
            .register_delay(&number("1"), Delay::from_minutes(5))
            .unwrap_err();
        assert_eq!(err, RegistryError::NotFound(number("1")));
    }

    #[test]
    fn find_by_train_number() {
        let registry = scenario_board();
        let d = registry.find_by_train_number(&number("1002")).unwrap();
        assert_eq!(d.destination(), "Bergen");
        assert!(registry.find_by_train_number(&number("2002")).is_none());
    }

    #[test]
    fn find_by_destination_ignores_case() {
        let mut registry = scenario_board();
        registry
            .add(make_departure("11:00", "L1", "1004", "Oslo", 3))
            .unwrap();

        for query in ["Oslo", "oslo", "OSLO"] {
            assert_eq!(
                numbers(&registry.find_by_destination(query)),
                ["1001", "1004"]
            );
        }
        assert!(registry.find_by_destination("Stavanger").is_empty());
    }

    #[test]
    fn clock_rejects_going_backwards() {
        let mut registry = DepartureRegistry::new();
        registry.set_current_time(time("09:00")).unwrap();

        let err = registry.set_current_time(time("08:00")).unwrap_err();
        assert_eq!(
            err,
            RegistryError::TimeGoesBackwards {
                current: time("09:00"),
                requested: time("08:00"),
            }
        );
        assert_eq!(registry.current_time(), time("09:00"));
    }

    #[test]
    fn clock_accepts_same_time() {
        let mut registry = DepartureRegistry::new();
        registry.set_current_time(time("09:00")).unwrap();
        registry.set_current_time(time("09:00")).unwrap();
        assert_eq!(registry.current_time(), time("09:00"));
    }

    #[test]
    fn purge_counts_delay() {
        let mut registry = scenario_board();
        registry
            .register_delay(&number("1003"), Delay::parse_hhmm("00:30").unwrap())
            .unwrap();

        // 1003 leaves at 10:45 once delayed
        registry.purge_before(time("10:30"));
        assert_eq!(all_numbers(&registry), ["1001", "1002", "1003"]);

        registry.purge_before(time("10:46"));
        assert!(registry.is_empty());
    }

    #[test]
    fn purge_keeps_departure_at_cutoff() {
        let mut registry = scenario_board();
        registry.purge_before(time("09:45"));
        assert_eq!(all_numbers(&registry), ["1002", "1003"]);
    }

    #[test]
    fn purge_treats_wrapped_delay_as_same_day() {
        let mut registry = DepartureRegistry::new();
        registry
            .add(make_departure("23:50", "N1", "7001", "Bodø", -1))
            .unwrap();
        registry
            .register_delay(&number("7001"), Delay::from_minutes(20))
            .unwrap();

        // Effective 00:10, which is before 01:00 on the same day
        registry.purge_before(time("01:00"));
        assert!(registry.is_empty());
    }

    #[test]
    fn advance_clock_purges() {
        let mut registry = scenario_board();
        registry.advance_clock(time("09:00")).unwrap();

        assert_eq!(registry.current_time(), time("09:00"));
        assert_eq!(all_numbers(&registry), ["1002", "1003"]);
    }

    #[test]
    fn advance_clock_rejected_does_not_purge() {
        let mut registry = scenario_board();
        registry.set_current_time(time("12:00")).unwrap();

        assert!(registry.advance_clock(time("11:00")).is_err());
        assert_eq!(registry.len(), 3);
        assert_eq!(registry.current_time(), time("12:00"));
    }

    #[test]
    fn list_after_is_strict() {
        let registry = scenario_board();
        assert_eq!(numbers(&registry.list_after(time("08:30"))), ["1002", "1003"]);
        assert_eq!(
            numbers(&registry.list_after(time("00:00"))),
            ["1001", "1002", "1003"]
        );
        assert!(registry.list_after(time("10:15")).is_empty());
    }

    #[test]
    fn list_after_uses_scheduled_time() {
        let mut registry = scenario_board();
        registry
            .register_delay(&number("1001"), Delay::from_minutes(120))
            .unwrap();
        // 1001 is delayed to 10:30 but was scheduled for 08:30
        assert_eq!(numbers(&registry.list_after(time("09:00"))), ["1002", "1003"]);
    }

    #[test]
    fn upcoming_follows_clock() {
        let mut registry = scenario_board();
        registry.set_current_time(time("09:45")).unwrap();
        assert_eq!(numbers(&registry.upcoming()), ["1003"]);
    }
}
