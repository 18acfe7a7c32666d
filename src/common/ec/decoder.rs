use super::{galois::GaloisField, Block};
use crate::common::error::{HccbError, HccbResult};

// Rectifier
//------------------------------------------------------------------------------

impl Block {
    // Corrects the block in place and returns the number of symbols changed
    pub fn rectify(&mut self) -> HccbResult<usize> {
        // Compute syndromes
        let synd = match self.syndromes() {
            Ok(()) => return Ok(0),
            Err(s) => s,
        };

        // Error locator polynomial
        let sig = self.berlekamp_massey(&synd)?;
        let err_loc = self.chien_search(&sig)?;

        // Sigma derivative
        let mut dsig = vec![0; sig.len()];
        for i in (1..sig.len()).step_by(2) {
            dsig[i - 1] = sig[i];
        }

        // Error evaluator
        let omg = self.omega(&synd, &sig);

        // Error magnitude
        let err_mag = self.forney(&omg, &dsig, &err_loc)?;

        // Rectify errors by XORing data with magnitude
        for (&i, &g) in err_loc.iter().zip(err_mag.iter()) {
            self.data[i] = self.gf.add(self.data[i], g);
        }

        match self.syndromes() {
            Ok(()) => Ok(err_loc.len()),
            Err(_) => Err(HccbError::UncorrectableError),
        }
    }

    fn syndromes(&self) -> Result<(), Vec<u16>> {
        let synd = (0..self.ec_len())
            .map(|i| horner(self.gf, &self.data, self.gf.gen_pow(i)))
            .collect::<Vec<_>>();

        if synd.iter().all(|&s| s == 0) {
            Ok(())
        } else {
            Err(synd)
        }
    }

    // Sigma polynomial, lowest degree first
    fn berlekamp_massey(&self, synd: &[u16]) -> HccbResult<Vec<u16>> {
        let gf = self.gf;
        let deg = synd.len();
        let mut l = 0usize;
        let mut m = 1usize;
        let mut b = 1;
        let mut cx = vec![0; deg + 1];
        let mut bx = vec![0; deg + 1];
        cx[0] = 1;
        bx[0] = 1;

        for n in 0..deg {
            // Calculate discrepancy
            let mut d = synd[n];
            for i in 1..=l {
                d = gf.add(d, gf.mul(cx[i], synd[n - i]));
            }

            if d == 0 {
                m += 1;
                continue;
            }

            // Temporary copy
            let tx = cx.clone();

            let scale = gf.div(d, b)?;
            for i in 0..=deg - m {
                cx[i + m] = gf.add(cx[i + m], gf.mul(scale, bx[i]));
            }

            if 2 * l <= n {
                bx = tx;
                l = n + 1 - l;
                b = d;
                m = 1;
            } else {
                m += 1;
            }
        }

        if 2 * l > deg {
            return Err(HccbError::UncorrectableError);
        }
        cx.truncate(l + 1);
        Ok(cx)
    }

    // Error positions, as indices into the block
    fn chien_search(&self, sig: &[u16]) -> HccbResult<Vec<usize>> {
        let len = self.len();
        let order = self.gf.order();
        let err_loc = (0..len)
            .filter(|&i| {
                let xinv = self.gf.gen_pow(order - (len - 1 - i));
                eval_poly(self.gf, sig, xinv) == 0
            })
            .collect::<Vec<_>>();

        // Roots outside the block mean the locator doesn't describe real errors
        if err_loc.len() != sig.len() - 1 {
            return Err(HccbError::UncorrectableError);
        }
        Ok(err_loc)
    }

    // Error evaluator polynomial
    fn omega(&self, synd: &[u16], sig: &[u16]) -> Vec<u16> {
        let t = synd.len();
        let mut omg = vec![0; t];
        for (i, &sy) in synd.iter().enumerate() {
            for (j, &si) in sig.iter().take(t - i).enumerate() {
                omg[i + j] = self.gf.add(omg[i + j], self.gf.mul(sy, si));
            }
        }
        omg
    }

    fn forney(&self, omg: &[u16], dsig: &[u16], err_loc: &[usize]) -> HccbResult<Vec<u16>> {
        let len = self.len();
        let order = self.gf.order();
        err_loc
            .iter()
            .map(|&i| {
                let x = self.gf.gen_pow(len - 1 - i);
                let xinv = self.gf.gen_pow(order - (len - 1 - i));
                let omg_x = eval_poly(self.gf, omg, xinv);
                let sig_x = eval_poly(self.gf, dsig, xinv);
                if sig_x == 0 {
                    return Err(HccbError::UncorrectableError);
                }
                self.gf.div(self.gf.mul(x, omg_x), sig_x)
            })
            .collect()
    }
}

// Evaluates a polynomial stored lowest degree first
fn eval_poly(gf: &GaloisField, poly: &[u16], x: u16) -> u16 {
    let mut res = 0;
    let mut xpow = 1;
    for &coeff in poly {
        res = gf.add(res, gf.mul(coeff, xpow));
        xpow = gf.mul(xpow, x);
    }
    res
}

// Evaluates a polynomial stored highest degree first
pub(crate) fn horner(gf: &GaloisField, poly: &[u16], x: u16) -> u16 {
    poly.iter().fold(0, |acc, &coeff| gf.add(gf.mul(acc, x), coeff))
}
