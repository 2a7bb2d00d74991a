//! Cores-per-multiprocessor lookup keyed by compute capability.

use colored::Colorize;

/// `(major << 4 | minor)` paired with the cores per SM of that generation.
/// Ordered oldest to newest; the last entry doubles as the fallback for
/// capabilities not in the table.
const SM_TO_CORES: &[(i32, i32)] = &[
    (0x20, 32),  // Fermi GF100
    (0x21, 48),  // Fermi GF10x
    (0x30, 192), // Kepler GK10x
    (0x32, 192), // Kepler GK10x
    (0x35, 192), // Kepler GK11x
    (0x37, 192), // Kepler GK21x
    (0x50, 128), // Maxwell GM10x
    (0x52, 128), // Maxwell GM20x
];

/// Cores per multiprocessor for a compute capability.
///
/// Capabilities missing from the table fall back to the last entry's value
/// so unlisted architectures still get a usable estimate; a warning is
/// printed when that happens.
pub fn cores_per_multiprocessor(major: i32, minor: i32) -> i32 {
    let sm = (major << 4) | minor;
    for &(version, cores) in SM_TO_CORES {
        if version == sm {
            return cores;
        }
    }

    let (_, fallback) = SM_TO_CORES[SM_TO_CORES.len() - 1];
    eprintln!(
        "{} cores per SM unknown for compute capability {}.{}, assuming {}",
        "Warning:".bold().yellow(),
        major,
        minor,
        fallback
    );
    fallback
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_capabilities_hit_the_table() {
        assert_eq!(cores_per_multiprocessor(2, 0), 32);
        assert_eq!(cores_per_multiprocessor(2, 1), 48);
        assert_eq!(cores_per_multiprocessor(3, 5), 192);
        assert_eq!(cores_per_multiprocessor(5, 2), 128);
    }

    #[test]
    fn unknown_capability_falls_back_to_last_entry() {
        assert_eq!(cores_per_multiprocessor(9, 9), 128);
        assert_eq!(cores_per_multiprocessor(0, 0), 128);
    }
}
