// Copyright 2019 Stichting Organism
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

#[macro_use]
extern crate criterion;

mod cosi_benches {
    use cosi::cosign::{commit, cosign, Commitment, Secret};
    use cosi::*;
    use criterion::Criterion;
    use rand::rngs::OsRng;

    static ROSTER_SIZES: [usize; 5] = [8, 32, 64, 128, 256];

    fn keypairs(n: usize) -> Vec<Keypair> {
        (0..n).map(|_| Keypair::generate(&mut OsRng)).collect()
    }

    fn roster(keypairs: &[Keypair]) -> Cosigners {
        Cosigners::new(keypairs.iter().map(|k| k.public).collect(), None)
    }

    fn collective_sign(keypairs: &[Keypair], cosigners: &mut Cosigners, msg: &[u8]) -> CollectiveSignature {
        let (commits, secrets): (Vec<Commitment>, Vec<Secret>) =
            keypairs.iter().map(|_| commit(&mut OsRng)).unzip();
        let aggregate = cosigners
            .aggregate_commit(&commits.into_iter().map(Some).collect::<Vec<_>>())
            .unwrap();
        let parts: Vec<_> = secrets
            .into_iter()
            .zip(keypairs.iter())
            .map(|(s, k)| Some(cosign(k, s, msg, &aggregate)))
            .collect();

        cosigners.aggregate_signature(&aggregate, &parts).unwrap()
    }

    fn sign(c: &mut Criterion) {
        let keypair: Keypair = Keypair::generate(&mut OsRng);
        let msg: &[u8] = b"yummy";

        c.bench_function("Ed25519 signing", move |b| b.iter(|| Signature::sign(&keypair, msg)));
    }

    fn collective_signing_round(c: &mut Criterion) {
        c.bench_function_over_inputs(
            "Collective signing round",
            |b, &&size| {
                let keypairs = keypairs(size);
                let mut cosigners = roster(&keypairs);
                let msg: &[u8] = b"aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa";

                b.iter(|| collective_sign(&keypairs, &mut cosigners, msg));
            },
            &ROSTER_SIZES,
        );
    }

    fn verify_collective(c: &mut Criterion) {
        c.bench_function_over_inputs(
            "Collective signature verification",
            |b, &&size| {
                let keypairs = keypairs(size);
                let mut cosigners = roster(&keypairs);
                let msg: &[u8] = b"aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa";
                let sig = collective_sign(&keypairs, &mut cosigners, msg).to_bytes();

                b.iter(|| cosigners.verify(msg, &sig));
            },
            &ROSTER_SIZES,
        );
    }

    fn mask_churn(c: &mut Criterion) {
        c.bench_function_over_inputs(
            "Participation mask churn",
            |b, &&size| {
                let mut cosigners = roster(&keypairs(size));
                let odd: Vec<u8> = vec![0b1010_1010; mask_len(size)];
                let even: Vec<u8> = vec![0b0101_0101; mask_len(size)];

                b.iter(|| {
                    cosigners.set_mask(&odd);
                    cosigners.set_mask(&even);
                });
            },
            &ROSTER_SIZES,
        );
    }

    criterion_group! {
        name = cosi_benches;
        config = Criterion::default();
        targets =
            sign,
            collective_signing_round,
            verify_collective,
            mask_churn,
    }
}

criterion_main!(cosi_benches::cosi_benches);
