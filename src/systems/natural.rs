//! Constants of the [`natural`](super::natural()) system

use once_cell::sync::Lazy;

use crate::quantity::Quantity;

macro_rules! constant {
    ($(#[$attr:meta])* $name:ident, $symbol:literal) => {
        $(#[$attr])*
        pub static $name: Lazy<Quantity> = Lazy::new(|| {
            super::natural()
                .find($symbol)
                .expect("bundled constant")
                .make(1.0)
        });
    };
}

constant!(
    /// Speed of light in vacuum
    C,
    "c"
);
constant!(
    /// Planck constant
    H,
    "h"
);
constant!(
    /// Reduced Planck constant
    HBAR,
    "ħ"
);
constant!(
    /// Elementary charge
    E,
    "e"
);
constant!(
    /// Boltzmann constant
    K_B,
    "k_B"
);
constant!(
    /// Hyperfine transition frequency of caesium 133
    DELTA_NU_CS,
    "ΔνCs"
);
constant!(
    /// Luminous efficacy of 540 THz radiation
    KCD,
    "Kcd"
);
constant!(
    /// Newtonian constant of gravitation
    G,
    "G"
);
constant!(
    /// Avogadro constant
    N_A,
    "N_A"
);
