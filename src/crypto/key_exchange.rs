use num_bigint::{BigUint, RandBigInt};
use rand::rngs::OsRng;
use x25519_dalek::{EphemeralSecret, PublicKey};
use zeroize::Zeroizing;

use crate::types::NamedGroup;
use crate::Error;

/// RFC 3526 2048-bit MODP group (group 14) prime, generator 2.
const MODP_2048_PRIME: &str = "\
    FFFFFFFFFFFFFFFFC90FDAA22168C234C4C6628B80DC1CD1\
    29024E088A67CC74020BBEA63B139B22514A08798E3404DD\
    EF9519B3CD3A431B302B0A6DF25F14374FE1356D6D51C245\
    E485B576625E7EC6F44C42E9A637ED6B0BFF5CB6F406B7ED\
    EE386BFB5A899FA5AE9F24117C4B1FE649286651ECE45B3D\
    C2007CB8A163BF0598DA48361C55D39A69163FA8FD24CF5F\
    83655D23DCA3AD961C62F356208552BB9ED529077096966D\
    670C354E4ABC9804F1746C08CA18217C32905E462E36CE3B\
    E39E772C180E86039B2783A2EC07A28FB5C55DF06F4C52C9\
    DE2BCBF6955817183995497CEA956AE515D2261898FA0510\
    15728E5A8AACAA68FFFFFFFFFFFFFFFF";

/// RFC 3526 4096-bit MODP group (group 16) prime, generator 2.
const MODP_4096_PRIME: &str = "\
    FFFFFFFFFFFFFFFFC90FDAA22168C234C4C6628B80DC1CD1\
    29024E088A67CC74020BBEA63B139B22514A08798E3404DD\
    EF9519B3CD3A431B302B0A6DF25F14374FE1356D6D51C245\
    E485B576625E7EC6F44C42E9A637ED6B0BFF5CB6F406B7ED\
    EE386BFB5A899FA5AE9F24117C4B1FE649286651ECE45B3D\
    C2007CB8A163BF0598DA48361C55D39A69163FA8FD24CF5F\
    83655D23DCA3AD961C62F356208552BB9ED529077096966D\
    670C354E4ABC9804F1746C08CA18217C32905E462E36CE3B\
    E39E772C180E86039B2783A2EC07A28FB5C55DF06F4C52C9\
    DE2BCBF6955817183995497CEA956AE515D2261898FA0510\
    15728E5A8AAAC42DAD33170D04507A33A85521ABDF1CBA64\
    ECFB850458DBEF0A8AEA71575D060C7DB3970F85A6E1E4C7\
    ABF5AE8CDB0933D71E8C94E04A25619DCEE3D2261AD2EE6B\
    F12FFA06D98A0864D87602733EC86A64521F2B18177B200C\
    BBE117577A615D6C770988C0BAD946E208E24FA074E5AB31\
    43DB5BFCE0FD108E4B82D120A92108011A723C12A787E6D7\
    88719A10BDBA5B2699C327186AF4E23C1A946834B6150BDA\
    2583E9CA2AD44CE8DBBBC2DB04DE8EF92E8EFC141FBECAA6\
    287C59474E6BC05D99B2964FA090C3A2233BA186515BE7ED\
    1F612970CEE2D7AFB81BDD762170481CD0069127D5B05AA9\
    93B4EA988D8FDDC186FFB7DC90A6C08F4DF435C934063199\
    FFFFFFFFFFFFFFFF";

/// RFC 3526 8192-bit MODP group (group 18) prime, generator 2.
const MODP_8192_PRIME: &str = "\
    FFFFFFFFFFFFFFFFC90FDAA22168C234C4C6628B80DC1CD1\
    29024E088A67CC74020BBEA63B139B22514A08798E3404DD\
    EF9519B3CD3A431B302B0A6DF25F14374FE1356D6D51C245\
    E485B576625E7EC6F44C42E9A637ED6B0BFF5CB6F406B7ED\
    EE386BFB5A899FA5AE9F24117C4B1FE649286651ECE45B3D\
    C2007CB8A163BF0598DA48361C55D39A69163FA8FD24CF5F\
    83655D23DCA3AD961C62F356208552BB9ED529077096966D\
    670C354E4ABC9804F1746C08CA18217C32905E462E36CE3B\
    E39E772C180E86039B2783A2EC07A28FB5C55DF06F4C52C9\
    DE2BCBF6955817183995497CEA956AE515D2261898FA0510\
    15728E5A8AAAC42DAD33170D04507A33A85521ABDF1CBA64\
    ECFB850458DBEF0A8AEA71575D060C7DB3970F85A6E1E4C7\
    ABF5AE8CDB0933D71E8C94E04A25619DCEE3D2261AD2EE6B\
    F12FFA06D98A0864D87602733EC86A64521F2B18177B200C\
    BBE117577A615D6C770988C0BAD946E208E24FA074E5AB31\
    43DB5BFCE0FD108E4B82D120A92108011A723C12A787E6D7\
    88719A10BDBA5B2699C327186AF4E23C1A946834B6150BDA\
    2583E9CA2AD44CE8DBBBC2DB04DE8EF92E8EFC141FBECAA6\
    287C59474E6BC05D99B2964FA090C3A2233BA186515BE7ED\
    1F612970CEE2D7AFB81BDD762170481CD0069127D5B05AA9\
    93B4EA988D8FDDC186FFB7DC90A6C08F4DF435C934028492\
    36C3FAB4D27C7026C1D4DCB2602646DEC9751E763DBA37BD\
    F8FF9406AD9E530EE5DB382F413001AEB06A53ED9027D831\
    179727B0865A8918DA3EDBEBCF9B14ED44CE6CBACED4BB1B\
    DB7F1447E6CC254B332051512BD7AF426FB8F401378CD2BF\
    5983CA01C64B92ECF032EA15D1721D03F482D7CE6E74FEF6\
    D55E702F46980C82B5A84031900B1C9E59E7C97FBEC7E8F3\
    23A97A7E36CC88BE0F1D45B7FF585AC54BD407B22B4154AA\
    CC8F6D7EBF48E1D814CC5ED20F8037E0A79715EEF29BE328\
    06A1D58BB7C5DA76F550AA3D8A1FBFF0EB19CCB1A313D55C\
    DA56C9EC2EF29632387FE8D76E3C0468043E8F663F4860EE\
    12BF2D5B0B7474D6E694F91E6DBE115974A3926F12FEE5E4\
    38777CB6A932DF8CD8BEC4D073B931BA3BC832B68D9DD300\
    741FA7BF8AFC47ED2576F6936BA424663AAB639C5AE4F568\
    3423B4742BF1C978238F16CBE39D652DE3FDB8BEFC848AD9\
    22222E04A4037C0713EB57A81A23F0C73473FC646CEA306B\
    4BCBC8862F8385DDFA9D4B7FA2C087E879683303ED5BDD3A\
    062B3CF5B3A278A66D2A13F83F44F82DDF310EE074AB6A36\
    4597E899A0255DC164F31CC50846851DF9AB48195DED7EA1\
    B1D510BD7EE74D73FAF36BC31ECFA268359046F4EB879F92\
    4009438B481C6CD7889A002ED5EE382BC9190DA6FC026E47\
    9558E4475677E9AA9E3050E2765694DFC81F56E880B96E71\
    60C980DD98EDD3DFFFFFFFFFFFFFFFFF";

const MODP_GENERATOR: u32 = 2;

/// One ephemeral key exchange. The private half is used exactly once.
pub(crate) struct KeyExchange {
    group: NamedGroup,
    inner: Inner,
    public_key: Vec<u8>,
}

enum Inner {
    X25519(Option<EphemeralSecret>),
    Modp(DhKeyExchange),
}

impl KeyExchange {
    /// Generate a fresh key pair in `group`.
    pub fn new(group: NamedGroup) -> Result<Self, Error> {
        let (inner, public_key) = match group {
            NamedGroup::X25519 => {
                let secret = EphemeralSecret::random_from_rng(OsRng);
                let public_key = PublicKey::from(&secret).as_bytes().to_vec();
                (Inner::X25519(Some(secret)), public_key)
            }
            NamedGroup::Modp2048 | NamedGroup::Modp4096 | NamedGroup::Modp8192 => {
                let prime = match group {
                    NamedGroup::Modp2048 => MODP_2048_PRIME,
                    NamedGroup::Modp4096 => MODP_4096_PRIME,
                    _ => MODP_8192_PRIME,
                };
                let len = group
                    .public_key_len()
                    .ok_or(Error::UnsupportedGroup(group))?;
                let dh = DhKeyExchange::new(prime, len)?;
                let public_key = dh.public_key();
                (Inner::Modp(dh), public_key)
            }
            NamedGroup::Unknown(_) => return Err(Error::UnsupportedGroup(group)),
        };

        Ok(KeyExchange {
            group,
            inner,
            public_key,
        })
    }

    pub fn public_key(&self) -> &[u8] {
        &self.public_key
    }

    /// Compute the shared secret with the peer's public key.
    ///
    /// Consumes the private key; a second call fails.
    pub fn compute_shared_secret(
        &mut self,
        peer_public_key: &[u8],
    ) -> Result<Zeroizing<Vec<u8>>, Error> {
        if Some(peer_public_key.len()) != self.group.public_key_len() {
            return Err(Error::InvalidPublicKey);
        }

        match &mut self.inner {
            Inner::X25519(secret) => {
                let Some(secret) = secret.take() else {
                    return Err(Error::CryptoError("X25519 secret already used".to_string()));
                };

                let mut peer = [0u8; 32];
                peer.copy_from_slice(peer_public_key);
                let shared = secret.diffie_hellman(&PublicKey::from(peer));

                // Low order points give an all-zero secret.
                if !shared.was_contributory() {
                    return Err(Error::InvalidPublicKey);
                }

                Ok(Zeroizing::new(shared.as_bytes().to_vec()))
            }
            Inner::Modp(dh) => dh.compute_shared_secret(peer_public_key),
        }
    }
}

/// Finite field Diffie-Hellman over a safe prime.
struct DhKeyExchange {
    /// Diffie-Hellman prime modulus
    prime: BigUint,

    /// Byte length of the prime; public values and secrets are padded to it.
    len: usize,

    /// Our private key (random exponent)
    private_key: Option<BigUint>,
}

impl DhKeyExchange {
    fn new(prime_hex: &str, len: usize) -> Result<Self, Error> {
        let prime = BigUint::parse_bytes(prime_hex.as_bytes(), 16)
            .ok_or_else(|| Error::CryptoError("Bad DH prime".to_string()))?;

        // Private key in [2, p - 2].
        let low = BigUint::from(2u32);
        let high = &prime - 1u32;
        let private_key = OsRng.gen_biguint_range(&low, &high);

        Ok(DhKeyExchange {
            prime,
            len,
            private_key: Some(private_key),
        })
    }

    fn public_key(&self) -> Vec<u8> {
        let generator = BigUint::from(MODP_GENERATOR);
        let public = match &self.private_key {
            Some(x) => generator.modpow(x, &self.prime),
            None => BigUint::from(0u32),
        };
        pad_be(&public, self.len)
    }

    fn compute_shared_secret(&mut self, peer_public_key: &[u8]) -> Result<Zeroizing<Vec<u8>>, Error> {
        let Some(private_key) = self.private_key.take() else {
            return Err(Error::CryptoError("DH private key already used".to_string()));
        };

        let peer_public = BigUint::from_bytes_be(peer_public_key);

        // Reject 0, 1, p - 1 and anything outside the group.
        let one = BigUint::from(1u32);
        if peer_public <= one || peer_public >= &self.prime - &one {
            return Err(Error::InvalidPublicKey);
        }

        let shared_secret = peer_public.modpow(&private_key, &self.prime);

        Ok(Zeroizing::new(pad_be(&shared_secret, self.len)))
    }
}

/// Big-endian bytes left padded with zeros to `len`.
fn pad_be(value: &BigUint, len: usize) -> Vec<u8> {
    let bytes = value.to_bytes_be();
    let mut out = vec![0u8; len.saturating_sub(bytes.len())];
    out.extend_from_slice(&bytes);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn x25519_agreement() {
        let mut a = KeyExchange::new(NamedGroup::X25519).unwrap();
        let mut b = KeyExchange::new(NamedGroup::X25519).unwrap();
        assert_eq!(a.public_key().len(), 32);

        let a_pub = a.public_key().to_vec();
        let b_pub = b.public_key().to_vec();

        let s1 = a.compute_shared_secret(&b_pub).unwrap();
        let s2 = b.compute_shared_secret(&a_pub).unwrap();
        assert_eq!(*s1, *s2);

        // Private key is single use.
        assert!(a.compute_shared_secret(&b_pub).is_err());
    }

    #[test]
    fn x25519_rejects_low_order_point() {
        let mut a = KeyExchange::new(NamedGroup::X25519).unwrap();
        assert_eq!(
            a.compute_shared_secret(&[0u8; 32]).unwrap_err(),
            Error::InvalidPublicKey
        );
    }

    #[test]
    fn modp_agreement() {
        let mut a = KeyExchange::new(NamedGroup::Modp2048).unwrap();
        let mut b = KeyExchange::new(NamedGroup::Modp2048).unwrap();
        assert_eq!(a.public_key().len(), 256);

        let a_pub = a.public_key().to_vec();
        let b_pub = b.public_key().to_vec();

        let s1 = a.compute_shared_secret(&b_pub).unwrap();
        let s2 = b.compute_shared_secret(&a_pub).unwrap();
        assert_eq!(s1.len(), 256);
        assert_eq!(*s1, *s2);
    }

    #[test]
    fn modp_prime_shape() {
        let prime = BigUint::parse_bytes(MODP_2048_PRIME.as_bytes(), 16).unwrap();
        assert_eq!(prime.bits(), 2048);
        let bytes = prime.to_bytes_be();
        assert_eq!(&bytes[..8], &[0xFF; 8]);
        assert_eq!(&bytes[248..], &[0xFF; 8]);
    }

    #[test]
    fn modp_4096_agreement() {
        let mut a = KeyExchange::new(NamedGroup::Modp4096).unwrap();
        let mut b = KeyExchange::new(NamedGroup::Modp4096).unwrap();
        assert_eq!(a.public_key().len(), 512);

        let a_pub = a.public_key().to_vec();
        let b_pub = b.public_key().to_vec();

        let s1 = a.compute_shared_secret(&b_pub).unwrap();
        let s2 = b.compute_shared_secret(&a_pub).unwrap();
        assert_eq!(s1.len(), 512);
        assert_eq!(*s1, *s2);

        // A 2048-bit key share does not fit this group.
        let mut c = KeyExchange::new(NamedGroup::Modp4096).unwrap();
        assert_eq!(
            c.compute_shared_secret(&[2u8; 256]).unwrap_err(),
            Error::InvalidPublicKey
        );
    }

    #[test]
    fn larger_primes_shape() {
        for (hex, bits) in [(MODP_4096_PRIME, 4096), (MODP_8192_PRIME, 8192)] {
            let prime = BigUint::parse_bytes(hex.as_bytes(), 16).unwrap();
            assert_eq!(prime.bits(), bits);

            let bytes = prime.to_bytes_be();
            assert_eq!(&bytes[..8], &[0xFF; 8]);
            assert_eq!(&bytes[bytes.len() - 8..], &[0xFF; 8]);

            // All three share the leading digits of pi.
            let small = BigUint::parse_bytes(MODP_2048_PRIME.as_bytes(), 16).unwrap();
            assert_eq!(&bytes[8..16], &small.to_bytes_be()[8..16]);
        }
    }

    #[test]
    fn modp_rejects_trivial_public_values() {
        let mut one = vec![0u8; 256];
        one[255] = 1;

        let mut a = KeyExchange::new(NamedGroup::Modp2048).unwrap();
        assert_eq!(
            a.compute_shared_secret(&one).unwrap_err(),
            Error::InvalidPublicKey
        );

        let mut b = KeyExchange::new(NamedGroup::Modp2048).unwrap();
        assert_eq!(
            b.compute_shared_secret(&[0xFF; 256]).unwrap_err(),
            Error::InvalidPublicKey
        );
    }

    #[test]
    fn wrong_length_public_key() {
        let mut a = KeyExchange::new(NamedGroup::X25519).unwrap();
        assert_eq!(
            a.compute_shared_secret(&[1u8; 31]).unwrap_err(),
            Error::InvalidPublicKey
        );
    }

    #[test]
    fn unknown_group() {
        assert!(matches!(
            KeyExchange::new(NamedGroup::Unknown(3)),
            Err(Error::UnsupportedGroup(_))
        ));
    }
}
