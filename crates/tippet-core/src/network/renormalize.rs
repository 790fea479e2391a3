//! Reference impedance renormalization

use super::core::Network;
use super::impedance::ReferenceImpedance;
use crate::error::Result;
use crate::math::transforms::renormalize_s;

impl Network {
    /// Express the same physical network against new reference impedances
    ///
    /// `z0_new` may be a scalar, a per-port vector or a [nfreq, nports]
    /// table. Goes through Z-parameters computed with the current `z0`.
    pub fn renormalize(&self, z0_new: impl Into<ReferenceImpedance>) -> Result<Network> {
        let z0_new = z0_new.into().resolve(self.nfreq(), self.nports())?;
        let s_new = renormalize_s(&self.s, &self.z0, &z0_new)?;

        let mut ntwk = Network::new(self.frequency.clone(), s_new, z0_new)?;
        ntwk.name = self.name.clone();
        Ok(ntwk)
    }
}
