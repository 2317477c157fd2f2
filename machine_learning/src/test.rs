#![cfg(test)]

use ndarray::{Array2, array, s};

use crate::{
    arch::DenoisingAutoencoder,
    training::{TrainerBuilder, TrainerSpec},
};

fn two_clusters() -> Array2<f64> {
    let mut data = Array2::zeros((8, 6));
    data.slice_mut(s![..4, ..3]).fill(1.);
    data.slice_mut(s![4.., 3..]).fill(1.);
    data
}

#[test]
fn test_ml_restores_dropped_entries() {
    let spec = TrainerSpec {
        n_hidden: 2,
        epochs: 300,
        ..Default::default()
    };

    let (mut model, trainer) = TrainerBuilder::new().build(&spec, two_clusters()).unwrap();
    trainer.train(&mut model).unwrap();

    let damaged = array![
        [1., 1., 0., 0., 0., 0.], // third entry dropped
        [0., 0., 0., 1., 0., 1.], // fifth entry dropped
    ];
    let z = model.reconstruct(damaged.view()).unwrap();

    println!("{z:#?}");
    assert!(z[[0, 2]] > 0.5);
    assert!(z[[1, 4]] > 0.5);
    assert!(z[[0, 4]] < 0.5);
    assert!(z[[1, 2]] < 0.5);
}

#[test]
fn test_ml_independent_models_train_in_parallel() {
    let data = two_clusters();

    let handles: Vec<_> = (0..4)
        .map(|seed| {
            let data = data.clone();
            std::thread::spawn(move || {
                let mut model = DenoisingAutoencoder::seeded(6, 2, seed).unwrap();
                for _ in 0..50 {
                    model.train(0.1, 0.3, Some(data.clone())).unwrap();
                }
                model.weights().to_owned()
            })
        })
        .collect();

    let weights: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    for seed in 0..4 {
        let mut model = DenoisingAutoencoder::seeded(6, 2, seed).unwrap();
        for _ in 0..50 {
            model.train(0.1, 0.3, Some(data.clone())).unwrap();
        }
        assert_eq!(model.weights(), weights[seed as usize]);
    }
}
