// hover help for every control, keyed by parameter name
//
// shown in the shared help panel; schema validation refuses to start the
// application if a table entry has no page here

/// Page shown when the pointer is over no control.
pub const DEFAULT_HELP: &str = "\
Configure a felixsim run with the parameter panels, then use the Options bar:

  1. Load CIF File picks the crystal structure to simulate.
  2. Select Output Directory chooses where results are written.
  3. Run writes felix.inp and felix.cif there and starts the simulator.

Save Input File and Load Input File store and restore the panel values as a \
felix.inp document. Hover over any control to see what it does.";

pub const DEFAULT_TITLE: &str = "felixsim front end";

/// Look up the help page for a parameter name.
pub fn lookup(name: &str) -> Option<&'static str> {
    let text = match name {
        "IWriteFLAG" => {
            "How much information felixsim prints while running, from Silent \
             (errors only) up to All information (full diagnostic output). \
             Verbose output slows long runs slightly."
        }
        "IScatterFactorMethodFLAG" => {
            "Parameterization used for the atomic scattering factors: \
             Kirkland, Doyle-Turner, Peng or Lobato. Kirkland is the usual \
             choice; the others exist for comparison with published work."
        }
        "IMaskFLAG" => {
            "Apply a circular mask to the output so only the physical \
             diffraction disc is kept. Unmasked images keep the full square \
             pixel grid."
        }
        "IZolzFLAG" => {
            "Restrict the reflection pool to the zero-order Laue zone. \
             Speeds up the calculation when higher-order zones do not \
             contribute."
        }
        "IAbsorbFLAG" => {
            "Absorption model. None runs a purely elastic calculation; \
             Proportional adds an absorptive potential scaled by the \
             percentage set in the crystal panel."
        }
        "IAnisoDebyeWallerFLAG" => {
            "Anisotropic Debye-Waller factors. Only the isotropic setting \
             (0) is currently supported by the simulator."
        }
        "IPseudoCubicFLAG" => {
            "Axis convention for direction indices. Orthorhombic uses the \
             crystal axes as given in the CIF; the pseudo-cubic convention \
             is intended for perovskite-type cells."
        }
        "IXDirectionFLAG" => {
            "Automatic derives the image x axis from the incident beam \
             direction; Manual uses the X Direction vector given in the \
             microscope panel."
        }
        "IPixelCount" => {
            "Radius of each simulated diffraction disc in pixels. Output \
             images are two times this value on a side, so 64 gives 128 by \
             128 pixel discs. Larger values cost memory and time."
        }
        "IMinReflectionPool" => {
            "Minimum number of reflections kept in the candidate pool from \
             which strong and weak beams are drawn. Too small a pool can \
             exclude beams that matter at the chosen thickness."
        }
        "IMinStrongBeams" => {
            "Minimum number of strong beams included exactly in the \
             Bloch-wave diagonalization. More strong beams improve accuracy \
             at cubic cost in the matrix size."
        }
        "IMinWeakBeams" => {
            "Minimum number of weak beams folded in through perturbation \
             rather than exact diagonalization."
        }
        "RBSBMax" => {
            "Largest deviation parameter a reflection may have and still be \
             classed as a strong beam."
        }
        "RBSPMax" => {
            "Largest perturbation strength accepted for weak beams. Beams \
             beyond this are dropped from the calculation."
        }
        "RDebyeWallerConstant" => {
            "Isotropic Debye-Waller factor B in square Angstroms, applied \
             to atoms whose CIF entry does not provide one. 0.467 is a \
             common room-temperature default."
        }
        "RAbsorptionPer" => {
            "Absorptive potential as a percentage of the real potential, \
             used when the absorption flag is set to Proportional. Around 3 \
             percent suits many oxides."
        }
        "ROuterConvergenceAngle" => {
            "Outer semi-angle of the incident cone in milliradians. Sets \
             the diffraction disc radius in reciprocal space."
        }
        "RInnerConvergenceAngle" => {
            "Inner semi-angle of the incident cone in milliradians. Leave \
             at zero for a filled disc; nonzero gives annular illumination."
        }
        "IIncidentBeamDirectionX" => {
            "U component of the incident beam zone axis [UVW], in direct \
             lattice coordinates."
        }
        "IIncidentBeamDirectionY" => {
            "V component of the incident beam zone axis [UVW], in direct \
             lattice coordinates."
        }
        "IIncidentBeamDirectionZ" => {
            "W component of the incident beam zone axis [UVW], in direct \
             lattice coordinates."
        }
        "IXDirectionX" => {
            "h component of the reciprocal lattice vector displayed along \
             the image x axis. Used when the x direction flag is Manual."
        }
        "IXDirectionY" => {
            "k component of the reciprocal lattice vector displayed along \
             the image x axis. Used when the x direction flag is Manual."
        }
        "IXDirectionZ" => {
            "l component of the reciprocal lattice vector displayed along \
             the image x axis. Used when the x direction flag is Manual."
        }
        "INormalDirectionX" => {
            "h component of the specimen surface normal. Usually equal to \
             the incident beam direction for a plan-view foil."
        }
        "INormalDirectionY" => {
            "k component of the specimen surface normal."
        }
        "INormalDirectionZ" => {
            "l component of the specimen surface normal."
        }
        "RAcceleratingVoltage" => {
            "Microscope accelerating voltage in kilovolts. Sets the \
             electron wavelength used throughout the calculation."
        }
        "RAcceptanceAngle" => {
            "Detector acceptance semi-angle in milliradians. Zero means no \
             restriction; a positive value clips reflections outside the \
             detector."
        }
        "RInitialThickness" => {
            "First specimen thickness in the series, in Angstroms."
        }
        "RFinalThickness" => {
            "Last specimen thickness in the series, in Angstroms. Equal to \
             the initial thickness for a single-thickness run."
        }
        "RDeltaThickness" => {
            "Step between successive thicknesses in Angstroms. A full image \
             set is written for every step."
        }
        "IReflectOut" => {
            "Number of reflections written out as individual images, taken \
             in order of increasing scattering angle."
        }
        "Montage" => {
            "Write a montage image placing every simulated disc at its \
             diffraction-pattern position, one file per thickness."
        }
        "Stack Reflections" => {
            "Write each reflection as its own image file, giving a stack of \
             discs per thickness."
        }
        "Amplitude and Phase" => {
            "Write separate amplitude and phase images for every \
             reflection, rather than intensities alone."
        }
        "MpiCores" => {
            "Number of MPI processes for the run. 1 launches the simulator \
             directly; higher values run it under mpirun -np."
        }
        _ => return None,
    };
    Some(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_table_entry_has_a_page() {
        for category in crate::schema::Category::ALL {
            for descriptor in category.descriptors() {
                assert!(
                    lookup(descriptor.name).is_some(),
                    "no help for {}",
                    descriptor.name
                );
            }
        }
    }

    #[test]
    fn test_cores_selector_has_a_page() {
        assert!(lookup("MpiCores").is_some());
    }

    #[test]
    fn test_unknown_names_fall_through() {
        assert_eq!(lookup("IUnknownFLAG"), None);
    }

    #[test]
    fn test_default_page_mentions_workflow() {
        assert!(DEFAULT_HELP.contains("Run"));
        assert!(DEFAULT_HELP.contains("CIF"));
    }
}
