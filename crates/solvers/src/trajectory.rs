use serde::{Serialize, Serializer, ser::SerializeStruct};

use oscillate_core::{Oscillator, State};

/// One point of a trajectory: the state of the mass at a grid time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Sample {
    pub time: f64,
    pub state: State,
}

/// The complete, chronologically ordered output of one simulation run.
///
/// A trajectory is built once by the simulator and never modified. Values are
/// kept exactly as computed; a run that blows up carries its infinities and
/// NaNs through to the end.
///
/// It serializes as three parallel arrays, `time`, `position`, and `velocity`,
/// ready to be plotted.
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    samples: Vec<Sample>,
}

impl Trajectory {
    pub(crate) fn new(samples: Vec<Sample>) -> Self {
        Self { samples }
    }

    #[must_use]
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    #[must_use]
    pub fn first(&self) -> Option<&Sample> {
        self.samples.first()
    }

    #[must_use]
    pub fn last(&self) -> Option<&Sample> {
        self.samples.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Sample> {
        self.samples.iter()
    }

    pub fn times(&self) -> impl ExactSizeIterator<Item = f64> + '_ {
        self.samples.iter().map(|sample| sample.time)
    }

    pub fn positions(&self) -> impl ExactSizeIterator<Item = f64> + '_ {
        self.samples.iter().map(|sample| sample.state.position)
    }

    pub fn velocities(&self) -> impl ExactSizeIterator<Item = f64> + '_ {
        self.samples.iter().map(|sample| sample.state.velocity)
    }

    /// Mechanical energy of every sample, in joules.
    pub fn energies<'a>(
        &'a self,
        oscillator: &'a Oscillator,
    ) -> impl ExactSizeIterator<Item = f64> + 'a {
        self.samples
            .iter()
            .map(|sample| oscillator.energy(sample.state))
    }
}

impl<'a> IntoIterator for &'a Trajectory {
    type Item = &'a Sample;
    type IntoIter = std::slice::Iter<'a, Sample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}

impl Serialize for Trajectory {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut out = serializer.serialize_struct("Trajectory", 3)?;
        out.serialize_field("time", &self.times().collect::<Vec<_>>())?;
        out.serialize_field("position", &self.positions().collect::<Vec<_>>())?;
        out.serialize_field("velocity", &self.velocities().collect::<Vec<_>>())?;
        out.end()
    }
}
