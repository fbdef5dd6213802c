/// Torsional angles, in degrees, describing one conformation of a glycosidic bond.
///
/// `chi1` doubles as omega when querying a reduced 1-6 table.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TorsionQuery {
    pub phi: f64,
    pub psi: f64,
    pub chi1: Option<f64>,
    pub chi2: Option<f64>,
    pub chi3: Option<f64>,
}

impl TorsionQuery {
    pub fn new(phi: f64, psi: f64) -> Self {
        Self {
            phi,
            psi,
            ..Self::default()
        }
    }

    pub fn with_chi1(mut self, chi1: f64) -> Self {
        self.chi1 = Some(chi1);
        self
    }

    /// Same as [`TorsionQuery::with_chi1`], named for 1-6 linkages.
    pub fn with_omega(self, omega: f64) -> Self {
        self.with_chi1(omega)
    }

    pub fn with_chi2(mut self, chi2: f64) -> Self {
        self.chi2 = Some(chi2);
        self
    }

    pub fn with_chi3(mut self, chi3: f64) -> Self {
        self.chi3 = Some(chi3);
        self
    }
}

/// Chemical shifts of the two glycosidic carbons, in ppm.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShiftPair {
    pub c1: f64,
    pub cx: f64,
}

impl ShiftPair {
    /// Returned when no tabulated conformer lies around the queried angles.
    pub const OUT_OF_RANGE: ShiftPair = ShiftPair {
        c1: f64::INFINITY,
        cx: f64::INFINITY,
    };

    pub fn new(c1: f64, cx: f64) -> Self {
        Self { c1, cx }
    }

    /// Converts a pair of shielding values into shifts.
    pub fn from_shielding(shielding: [f64; 2], ef_corr: f64) -> Self {
        Self {
            c1: ef_corr - shielding[0],
            cx: ef_corr - shielding[1],
        }
    }

    /// Converts the shifts back into the shielding values stored in the tables.
    pub fn to_shielding(self, ef_corr: f64) -> [f64; 2] {
        [ef_corr - self.c1, ef_corr - self.cx]
    }

    /// `true` when the query fell outside the computed conformational zone.
    pub fn is_out_of_range(&self) -> bool {
        self.c1.is_infinite() || self.cx.is_infinite()
    }
}

impl From<ShiftPair> for (f64, f64) {
    fn from(pair: ShiftPair) -> Self {
        (pair.c1, pair.cx)
    }
}
