use slotmap::new_key_type;

// Slot-map keys stay valid across hydrogen removal, which is what makes the
// strip-then-rebuild pass safe to run in place.
new_key_type! {
    pub struct AtomId;
    pub struct ResidueId;
    pub struct ChainId;
}
