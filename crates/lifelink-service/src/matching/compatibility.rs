//! ABO/Rh donor compatibility rules.

use lifelink_entity::donor::BloodType;

/// Return the blood types that may donate to the given recipient type.
///
/// Fixed lookup table: O− donates to everyone, AB+ receives from
/// everyone. Pure and total over the closed [`BloodType`] enum;
/// unknown type strings are rejected at the parse boundary before they
/// reach this function.
pub fn compatible_donor_types(recipient: BloodType) -> &'static [BloodType] {
    use BloodType::*;

    match recipient {
        ONeg => &[ONeg],
        OPos => &[ONeg, OPos],
        ANeg => &[ONeg, ANeg],
        APos => &[ONeg, OPos, ANeg, APos],
        BNeg => &[ONeg, BNeg],
        BPos => &[ONeg, OPos, BNeg, BPos],
        AbNeg => &[ONeg, ANeg, BNeg, AbNeg],
        AbPos => &[ONeg, OPos, ANeg, APos, BNeg, BPos, AbNeg, AbPos],
    }
}
