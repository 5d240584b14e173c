//! In-memory farm driven through the accounting layer with explicit blocks.

#![allow(dead_code)]

use std::collections::BTreeMap;

use anchor_lang::prelude::*;
use block_farm::accounting::farm::{self, EmergencyExit, Settlement};
use block_farm::state::{Farm, FarmPool, UserStake};

pub const REWARD_PER_BLOCK: u64 = 100;
pub const START_BLOCK: u64 = 100;

pub struct Harness {
    pub farm: Farm,
    pub pools: Vec<FarmPool>,
    pub stakes: BTreeMap<(usize, &'static str), UserStake>,
    pub paid: BTreeMap<&'static str, u64>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_window(REWARD_PER_BLOCK, START_BLOCK)
    }

    pub fn with_window(reward_per_block: u64, start_block: u64) -> Self {
        let farm = Farm {
            authority: Pubkey::new_unique(),
            reward_mint: Pubkey::new_unique(),
            reward_per_block,
            start_block,
            end_block: start_block,
            ..Default::default()
        };
        Self {
            farm,
            pools: Vec::new(),
            stakes: BTreeMap::new(),
            paid: BTreeMap::new(),
        }
    }

    pub fn add_pool(&mut self, alloc_point: u64, with_update: bool, block: u64) -> usize {
        if with_update {
            farm::mass_update(&self.farm, &mut self.pools, block).unwrap();
        }
        let mut pool = FarmPool {
            stake_mint: Pubkey::new_unique(),
            ..Default::default()
        };
        let index = farm::add_pool(&mut self.farm, &mut pool, alloc_point, block).unwrap();
        self.pools.push(pool);
        index as usize
    }

    pub fn fund(&mut self, amount: u64, block: u64) -> Result<u64> {
        farm::fund(&mut self.farm, amount, block)
    }

    fn stake_of(&mut self, pool: usize, who: &'static str) -> &mut UserStake {
        self.stakes.entry((pool, who)).or_default()
    }

    fn credit(&mut self, who: &'static str, reward: u64) {
        *self.paid.entry(who).or_default() += reward;
    }

    pub fn stake(&mut self, pool: usize, who: &'static str, amount: u64, block: u64) -> Result<Settlement> {
        let mut stake = std::mem::take(self.stake_of(pool, who));
        let result = farm::stake(&mut self.farm, &mut self.pools[pool], &mut stake, amount, block);
        self.stakes.insert((pool, who), stake);
        let settlement = result?;
        self.credit(who, settlement.reward);
        Ok(settlement)
    }

    pub fn withdraw(&mut self, pool: usize, who: &'static str, amount: u64, block: u64) -> Result<Settlement> {
        let mut stake = std::mem::take(self.stake_of(pool, who));
        let result = farm::withdraw(&mut self.farm, &mut self.pools[pool], &mut stake, amount, block);
        self.stakes.insert((pool, who), stake);
        let settlement = result?;
        self.credit(who, settlement.reward);
        Ok(settlement)
    }

    pub fn emergency_withdraw(&mut self, pool: usize, who: &'static str, block: u64) -> EmergencyExit {
        let mut stake = std::mem::take(self.stake_of(pool, who));
        let exit = farm::emergency_withdraw(&mut self.farm, &mut self.pools[pool], &mut stake, block);
        self.stakes.insert((pool, who), stake);
        exit
    }

    pub fn pending(&self, pool: usize, who: &'static str, block: u64) -> u64 {
        match self.stakes.get(&(pool, who)) {
            Some(stake) => farm::pending(&self.farm, &self.pools[pool], stake, block).unwrap(),
            None => 0,
        }
    }

    pub fn staked(&self, pool: usize, who: &'static str) -> u64 {
        self.stakes.get(&(pool, who)).map_or(0, |stake| stake.amount)
    }

    pub fn total_pending(&self, block: u64) -> u64 {
        self.farm.total_pending(block).unwrap()
    }

    pub fn paid(&self, who: &'static str) -> u64 {
        self.paid.get(who).copied().unwrap_or(0)
    }
}
